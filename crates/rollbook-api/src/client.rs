// Records service HTTP client
//
// Wraps `reqwest::Client` with URL construction and response decoding.
// Endpoint methods (login, student details) are implemented as inherent
// methods in separate files to keep this module focused on transport.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::ErrorBody;
use crate::transport::TransportConfig;

/// Longest body excerpt carried in error messages and logs.
const BODY_PREVIEW: usize = 200;

/// Raw HTTP client for the records service.
///
/// Stateless: the service issues no session token, so every call stands
/// alone and the client can be shared freely.
#[derive(Debug, Clone)]
pub struct RecordsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RecordsClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the service root (e.g.
    /// `https://dmc-withlogin-backend.onrender.com`); a path prefix is
    /// kept when present.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{path}`.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Response helpers ─────────────────────────────────────────────

    /// Decode a 2xx body as `T`.
    pub(crate) async fn decode<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(bytes = body.len(), "response body received");
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }

    /// Turn a non-2xx response into `Error::Rejected`, keeping the
    /// service's `detail` text when the body has one.
    pub(crate) async fn rejection(&self, resp: reqwest::Response) -> Error {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        debug!(status, body = preview(&body), "request rejected");
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::detail_text);
        Error::Rejected { status, detail }
    }
}

fn preview(body: &str) -> &str {
    let mut end = body.len().min(BODY_PREVIEW);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
