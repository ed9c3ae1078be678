use thiserror::Error;

/// Top-level error type for the `rollbook-api` crate.
///
/// Covers every failure mode of the records service surface: input
/// validation, rejected requests, response parsing, and transport.
/// `rollbook-core` maps these into the single user-facing message.
#[derive(Debug, Error)]
pub enum Error {
    // ── Input ───────────────────────────────────────────────────────
    /// The birthday could not be parsed as a calendar date.
    #[error("Invalid birthday '{input}': {reason}")]
    InvalidBirthday { input: String, reason: String },

    // ── Service ─────────────────────────────────────────────────────
    /// Non-2xx response. `detail` is the service's `{"detail": ...}` text,
    /// when the body carried one.
    #[error("Request rejected (HTTP {status}){}", detail_suffix(.detail))]
    Rejected { status: u16, detail: Option<String> },

    /// The login response used the nested `student` object with
    /// document-style keys instead of the top-level contract.
    #[error("Login response uses the legacy nested `student` shape")]
    LegacyLoginShape,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

impl Error {
    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if no usable response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Tls(_))
    }
}
