//! State bridge: connects the [`Portal`] watch channel to TUI actions.
//!
//! Runs as a background task forwarding every portal state change as an
//! [`Action::PortalUpdated`] through the TUI's action channel.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use rollbook_core::Portal;

use crate::action::Action;

/// Forward portal state until cancelled or the app stops listening.
///
/// The current state is sent first so the screens start in sync.
pub async fn spawn_state_bridge(
    portal: Portal,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut state_rx = portal.subscribe();

    let initial = state_rx.borrow_and_update().clone();
    if action_tx.send(Action::PortalUpdated(Arc::new(initial))).is_err() {
        return;
    }

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                debug!(view = ?state.view(), loading = state.is_loading(), "portal state changed");
                if action_tx.send(Action::PortalUpdated(Arc::new(state))).is_err() {
                    break;
                }
            }
        }
    }

    debug!("state bridge stopped");
}
