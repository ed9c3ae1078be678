// ── Core error types ──
//
// User-facing errors from rollbook-core. Consumers never match on HTTP
// status codes or JSON parse failures: `from_login` / `from_details`
// translate transport-layer errors into the three surfaced categories
// (rejected, server error, validation).

use thiserror::Error;

/// Shown when the service rejects a login without a `detail` message.
pub const LOGIN_FAILED: &str = "Login failed";

/// Shown when no usable response was received.
pub const SERVER_ERROR: &str = "Server error";

/// Shown when the service rejects a details request.
pub const DETAILS_FAILED: &str = "Failed to fetch details";

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input ────────────────────────────────────────────────────────
    #[error("{message}")]
    ValidationFailed { message: String },

    // ── Preconditions ────────────────────────────────────────────────
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("No session selected")]
    NoSessionSelected,

    #[error("Session '{session}' is not in the student's session list")]
    UnknownSession { session: String },

    // ── Service outcomes ─────────────────────────────────────────────
    /// `message` is the service's `detail`, or [`LOGIN_FAILED`].
    #[error("{message}")]
    LoginRejected {
        message: String,
        status: Option<u16>,
    },

    #[error("Failed to fetch details")]
    DetailsRejected { status: Option<u16> },

    #[error("Server error: {reason}")]
    ServerError { reason: String },

    /// The response arrived after a newer request or a logout.
    #[error("Request superseded by a newer action")]
    Superseded,

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Map a failed login call.
    pub fn from_login(err: rollbook_api::Error) -> Self {
        match err {
            rollbook_api::Error::Rejected { status, detail } => Self::LoginRejected {
                message: detail.unwrap_or_else(|| LOGIN_FAILED.into()),
                status: Some(status),
            },
            rollbook_api::Error::InvalidBirthday { reason, .. } => {
                Self::ValidationFailed { message: reason }
            }
            other => Self::server(&other),
        }
    }

    /// Map a failed details call. Any service rejection collapses to
    /// [`DETAILS_FAILED`].
    pub fn from_details(err: rollbook_api::Error) -> Self {
        match err {
            rollbook_api::Error::Rejected { status, .. } => Self::DetailsRejected {
                status: Some(status),
            },
            other => Self::server(&other),
        }
    }

    fn server(err: &rollbook_api::Error) -> Self {
        Self::ServerError {
            reason: err.to_string(),
        }
    }

    /// The single human-readable string surfaced in the UI.
    pub fn user_message(&self) -> String {
        match self {
            Self::ServerError { .. } => SERVER_ERROR.into(),
            other => other.to_string(),
        }
    }
}

impl From<rollbook_api::Error> for CoreError {
    /// Context-free conversion, used for client construction.
    fn from(err: rollbook_api::Error) -> Self {
        match err {
            rollbook_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            rollbook_api::Error::Tls(message) => Self::Config { message },
            other => Self::server(&other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_login_uses_detail() {
        let err = CoreError::from_login(rollbook_api::Error::Rejected {
            status: 401,
            detail: Some("Invalid credentials".into()),
        });
        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(matches!(err, CoreError::LoginRejected { status: Some(401), .. }));
    }

    #[test]
    fn rejected_login_without_detail_falls_back() {
        let err = CoreError::from_login(rollbook_api::Error::Rejected {
            status: 400,
            detail: None,
        });
        assert_eq!(err.user_message(), LOGIN_FAILED);
    }

    #[test]
    fn legacy_shape_is_a_server_error() {
        let err = CoreError::from_login(rollbook_api::Error::LegacyLoginShape);
        assert_eq!(err.user_message(), SERVER_ERROR);
        assert!(err.to_string().starts_with("Server error: "));
    }

    #[test]
    fn rejected_details_ignore_body() {
        let err = CoreError::from_details(rollbook_api::Error::Rejected {
            status: 500,
            detail: Some("stack trace".into()),
        });
        assert_eq!(err.user_message(), DETAILS_FAILED);
    }

    #[test]
    fn malformed_details_are_a_server_error() {
        let err = CoreError::from_details(rollbook_api::Error::Deserialization {
            message: "missing field `basic`".into(),
            body: "{}".into(),
        });
        assert_eq!(err.user_message(), SERVER_ERROR);
    }
}
