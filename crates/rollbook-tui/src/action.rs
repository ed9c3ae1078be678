//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use rollbook_core::{CredentialForm, PortalState};

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,

    // ── Portal state (from the state bridge) ──────────────────────
    PortalUpdated(Arc<PortalState>),

    // ── Requests ──────────────────────────────────────────────────
    /// Validated form input, ready to send.
    SubmitLogin(CredentialForm),
    /// Select a session and fetch its details.
    OpenSession(String),
    Logout,
}
