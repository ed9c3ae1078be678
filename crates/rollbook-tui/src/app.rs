//! Application core: event loop, screen switching, action dispatch.

use std::collections::HashMap;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use rollbook_core::{Portal, PortalState};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    /// Screen matching the portal's current view.
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    portal: Portal,
    /// Shown in the status bar.
    base_url: String,
    /// Registration number of the logged-in student, if any.
    signed_in: Option<String>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Stops the state bridge on exit.
    bridge_cancel: CancellationToken,
}

impl App {
    pub fn new(portal: Portal, base_url: String, roll_number: Option<String>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            active_screen: ScreenId::from(portal.view()),
            screens: create_screens(roll_number).into_iter().collect(),
            running: true,
            portal,
            base_url,
            signed_in: None,
            action_tx,
            action_rx,
            bridge_cancel: CancellationToken::new(),
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::start()?;

        tokio::spawn(crate::state_bridge::spawn_state_bridge(
            self.portal.clone(),
            self.action_tx.clone(),
            self.bridge_cancel.clone(),
        ));

        let mut events = EventReader::spawn(
            Duration::from_millis(100), // throbber tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Tick => self.action_tx.send(Action::Tick)?,
                // ratatui re-reads the terminal size on draw.
                Event::Render | Event::Resize => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.bridge_cancel.cancel();
        drop(events);
        info!("TUI event loop ended");
        Ok(())
    }

    /// Ctrl+C always quits; everything else goes to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }
        match self.screens.get_mut(&self.active_screen) {
            Some(screen) => screen.handle_key_event(key),
            None => Ok(None),
        }
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
                return Ok(());
            }
            Action::PortalUpdated(state) => self.apply_state(state),
            Action::SubmitLogin(form) => {
                let portal = self.portal.clone();
                let form = form.clone();
                tokio::spawn(async move {
                    // Failures already live in the published state.
                    if let Err(e) = portal.login(&form).await {
                        debug!(error = %e, "login finished with error");
                    }
                });
            }
            Action::OpenSession(session) => {
                let portal = self.portal.clone();
                let session = session.clone();
                tokio::spawn(async move {
                    if let Err(e) = portal.open_session(&session).await {
                        debug!(error = %e, "details finished with error");
                    }
                });
            }
            Action::Logout => {
                let portal = self.portal.clone();
                tokio::spawn(async move { portal.logout().await });
            }
            Action::Tick | Action::Render => {}
        }

        // Screens see every action; follow-ups are queued.
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn apply_state(&mut self, state: &PortalState) {
        let next = ScreenId::from(state.view());
        if next != self.active_screen {
            debug!(from = %self.active_screen, to = %next, "switching screen");
            self.active_screen = next;
        }
        self.signed_in = state.student().map(|s| s.reg_no.clone());
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let [content_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }
        self.render_status_bar(frame, status_area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let status = match &self.signed_in {
            Some(reg_no) => Span::styled(
                format!("\u{25cf} {reg_no}"),
                Style::default().fg(theme::OK),
            ),
            None => Span::styled("\u{25cb} signed out", Style::default().fg(theme::TEXT)),
        };

        let hints = self
            .screens
            .get(&self.active_screen)
            .map_or("", |s| s.key_hints());

        let line = Line::from(vec![
            Span::styled(" rollbook ", theme::heading()),
            Span::styled(format!("{} ", self.active_screen), theme::label()),
            status,
            Span::styled(format!(" \u{2502} {} ", self.base_url), theme::hint()),
            Span::styled(format!("\u{2502} {hints}"), theme::hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
