//! State container and request orchestration between `rollbook-api` and
//! the UI consumers (CLI / TUI).
//!
//! - **[`Portal`]**: Async facade owning the records client and the
//!   single portal state. [`login()`](Portal::login),
//!   [`select_session()`](Portal::select_session),
//!   [`fetch_details()`](Portal::fetch_details) and
//!   [`logout()`](Portal::logout) drive every transition; each change is
//!   published on a `tokio::sync::watch` channel for reactive rendering.
//!
//! - **[`Store`]**: The reducer. Holds one [`PortalState`] value plus a
//!   request generation counter, so a response for a superseded request
//!   is dropped instead of overwriting newer state.
//!
//! - **[`CredentialForm`]**: Raw form input, validated into
//!   [`Credentials`] before any request is issued.

pub mod config;
pub mod credentials;
pub mod error;
pub mod portal;
pub mod state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_BASE_URL, PortalConfig, TlsVerification};
pub use credentials::{CredentialForm, Credentials};
pub use error::{CoreError, DETAILS_FAILED, LOGIN_FAILED, SERVER_ERROR};
pub use portal::Portal;
pub use state::{
    Dashboard, DetailStatus, PortalEvent, PortalState, RequestId, Selection, Store, View,
};

// Wire types surface unchanged.
pub use rollbook_api::{AcademicInfo, BasicInfo, LoginResult, StudentDetails, Subject};
