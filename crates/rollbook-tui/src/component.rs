//! What `App` needs from each screen.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::action::Action;

/// Keys reach only the active screen; every dispatched action reaches all
/// of them, so the hidden screen still tracks portal state.
pub trait Component: Send {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>>;

    /// May return a follow-up action.
    fn update(&mut self, action: &Action) -> Result<Option<Action>>;

    fn render(&self, frame: &mut Frame, area: Rect);

    /// Shown in the status bar.
    fn key_hints(&self) -> &'static str;
}
