//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use rollbook_config::ConfigError;
use rollbook_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Service ──────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(rollbook::login_rejected),
        help("Check the roll number and the date of birth (YYYY-MM-DD).")
    )]
    LoginRejected { message: String },

    #[error("Failed to fetch details")]
    #[diagnostic(
        code(rollbook::details_failed),
        help("The service refused the request. Try again, or pick another session.")
    )]
    DetailsFailed,

    #[error("Server error")]
    #[diagnostic(
        code(rollbook::server_error),
        help(
            "{reason}\n\
             Check that the records service is reachable (--base-url, --timeout)."
        )
    )]
    ServerError { reason: String },

    // ── Sessions ─────────────────────────────────────────────────────
    #[error("Session '{session}' not found")]
    #[diagnostic(
        code(rollbook::unknown_session),
        help("Available sessions: {available}")
    )]
    UnknownSession { session: String, available: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(rollbook::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(rollbook::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: rollbook config set-profile {name} --url <URL>"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(rollbook::config),
        help("Inspect the file with: rollbook config show")
    )]
    Config { message: String },

    // ── Internal ─────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(rollbook::internal))]
    Internal { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::LoginRejected { .. } => exit_code::AUTH,
            Self::UnknownSession { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::ServerError { .. } => exit_code::CONNECTION,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationFailed { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::LoginRejected { message, .. } => Self::LoginRejected { message },
            CoreError::DetailsRejected { .. } => Self::DetailsFailed,
            CoreError::ServerError { reason } => Self::ServerError { reason },
            CoreError::UnknownSession { session } => Self::UnknownSession {
                session,
                available: "(unknown)".into(),
            },
            CoreError::Config { message } => Self::Config { message },
            other @ (CoreError::NotLoggedIn
            | CoreError::NoSessionSelected
            | CoreError::Superseded) => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::ProfileNotFound { name, available } => {
                Self::ProfileNotFound { name, available }
            }
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}
