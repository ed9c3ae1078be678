// Login
//
// `POST /login` with `{login_id, password}`. The service is stateless:
// a successful login returns the student summary and session list,
// nothing is stored client-side.

use tracing::debug;

use crate::client::RecordsClient;
use crate::error::Error;
use crate::models::{LegacyLoginEnvelope, LoginRequest, LoginResult};

/// Keys the legacy nested `student` object carried.
const LEGACY_KEYS: [&str; 2] = ["Name as per 10th Document", "Roll Number"];

impl RecordsClient {
    /// Authenticate a student.
    ///
    /// - 2xx: the body must be `{name, regNo, sessionList}`.
    /// - non-2xx: [`Error::Rejected`] with the body's `detail`, if any.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResult, Error> {
        let url = self.endpoint("login")?;
        debug!(login_id = %request.login_id, "logging in at {}", url);

        let resp = self
            .http()
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(Error::Transport)?;

        if !resp.status().is_success() {
            return Err(self.rejection(resp).await);
        }

        let value: serde_json::Value = self.decode(resp).await?;
        if is_legacy_shape(&value) {
            return Err(Error::LegacyLoginShape);
        }

        let result: LoginResult =
            serde_json::from_value(value.clone()).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: value.to_string(),
            })?;

        debug!(
            reg_no = %result.reg_no,
            sessions = result.session_list.len(),
            "login successful"
        );
        Ok(result)
    }
}

fn is_legacy_shape(value: &serde_json::Value) -> bool {
    serde_json::from_value::<LegacyLoginEnvelope>(value.clone())
        .is_ok_and(|env| LEGACY_KEYS.iter().any(|k| env.student.contains_key(*k)))
}
