//! Credential form: roll number and date of birth.
//!
//! Input is validated locally so an incomplete form never produces a
//! request. While a login is in flight the submit button is replaced by
//! a throbber and Enter is ignored.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use rollbook_core::{CredentialForm, PortalState};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    RollNumber,
    Birthday,
}

impl Field {
    fn toggle(self) -> Self {
        match self {
            Self::RollNumber => Self::Birthday,
            Self::Birthday => Self::RollNumber,
        }
    }
}

// ── Component ───────────────────────────────────────────────────────

pub struct LoginScreen {
    roll_input: String,
    birthday_input: String,
    field: Field,
    loading: bool,
    error: Option<String>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl LoginScreen {
    pub fn new(roll_number: Option<String>) -> Self {
        let roll_input = roll_number.unwrap_or_default();
        // Jump straight to the birthday when the roll number is known.
        let field = if roll_input.is_empty() {
            Field::RollNumber
        } else {
            Field::Birthday
        };
        Self {
            roll_input,
            birthday_input: String::new(),
            field,
            loading: false,
            error: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn active_input_mut(&mut self) -> &mut String {
        match self.field {
            Field::RollNumber => &mut self.roll_input,
            Field::Birthday => &mut self.birthday_input,
        }
    }

    fn submit(&mut self) -> Option<Action> {
        if self.loading {
            return None;
        }
        let form = CredentialForm::new(self.roll_input.clone(), self.birthday_input.clone());
        match form.validate() {
            Ok(_) => {
                self.error = None;
                // Cleared by the next published portal state.
                self.loading = true;
                Some(Action::SubmitLogin(form))
            }
            Err(e) => {
                self.error = Some(e.user_message());
                None
            }
        }
    }

    fn apply_state(&mut self, state: &PortalState) {
        self.loading = matches!(state, PortalState::LoggingIn { .. });
        match state {
            PortalState::LoggedOut { error } => self.error.clone_from(error),
            PortalState::LoggingIn { .. } => self.error = None,
            // The birthday is the password; don't keep it around.
            PortalState::LoggedIn(_) => {
                self.birthday_input.clear();
                self.error = None;
                self.field = Field::Birthday;
            }
        }
    }
}

impl Component for LoginScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.field = self.field.toggle();
                None
            }
            KeyCode::Backspace => {
                self.active_input_mut().pop();
                None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.active_input_mut().push(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::PortalUpdated(state) => self.apply_state(state),
            Action::Tick if self.loading => self.throbber_state.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BACKDROP)),
            area,
        );

        let inner = render_centered_panel(frame, area);

        let layout = Layout::vertical([
            Constraint::Length(4), // roll number
            Constraint::Length(4), // birthday
            Constraint::Length(2), // button / throbber
            Constraint::Length(1), // error
            Constraint::Min(0),
        ])
        .split(inner);

        render_input_field(
            frame,
            layout[0],
            "  Roll number",
            &self.roll_input,
            self.field == Field::RollNumber,
        );
        render_input_field(
            frame,
            layout[1],
            "  Date of birth (YYYY-MM-DD)",
            &self.birthday_input,
            self.field == Field::Birthday,
        );

        let button_area = Rect::new(layout[2].x, layout[2].y + 1, layout[2].width, 1);
        if self.loading {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Logging in...")
                .style(Style::default().fg(theme::HEADING))
                .throbber_style(Style::default().fg(theme::ACCENT));
            frame.render_stateful_widget(throbber, button_area, &mut self.throbber_state.clone());
        } else {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "[ Login ]",
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
                button_area,
            );
        }

        if let Some(ref err) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(err.as_str(), theme::error()))
                    .alignment(Alignment::Center),
                layout[3],
            );
        }
    }

    fn key_hints(&self) -> &'static str {
        "Tab switch field  Enter login  Esc quit"
    }
}

// ── Renderers ───────────────────────────────────────────────────────

fn render_centered_panel(frame: &mut Frame, area: Rect) -> Rect {
    let panel_w = 52u16.min(area.width.saturating_sub(4));
    let panel_h = 15u16.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(panel_w)) / 2;
    let y = (area.height.saturating_sub(panel_h)) / 2;
    let panel = Rect::new(area.x + x, area.y + y, panel_w, panel_h);

    let block = Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled("Student Login", theme::heading()),
            Span::raw(" "),
        ]))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::focused_border());

    let inner = block.inner(panel);
    frame.render_widget(block, panel);
    inner
}

fn render_input_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    if area.height < 4 {
        return;
    }

    let label_style = if active {
        Style::default().fg(theme::HEADING)
    } else {
        Style::default().fg(theme::TEXT)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(label, label_style)),
        Rect::new(area.x, area.y, area.width, 1),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if active {
            theme::focused_border()
        } else {
            theme::border()
        });

    let block_area = Rect::new(area.x + 1, area.y + 1, area.width.saturating_sub(2), 3);
    let inner = block.inner(block_area);
    frame.render_widget(block, block_area);

    let cursor = if active { "\u{2588}" } else { "" };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(value, theme::text()),
            Span::styled(cursor, Style::default().fg(theme::ACCENT)),
        ])),
        inner,
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    use rollbook_core::RequestId;

    use super::*;

    fn press(screen: &mut LoginScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_str(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    fn logging_in() -> Action {
        let mut store = rollbook_core::Store::new();
        let request: RequestId = store.next_request();
        Action::PortalUpdated(Arc::new(PortalState::LoggingIn { request }))
    }

    fn screen_text(screen: &LoginScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn tab_switches_field_and_enter_submits() {
        let mut screen = LoginScreen::new(None);
        type_str(&mut screen, "R100");
        press(&mut screen, KeyCode::Tab);
        type_str(&mut screen, "2005-03-01");

        let action = press(&mut screen, KeyCode::Enter);
        let Some(Action::SubmitLogin(form)) = action else {
            panic!("expected SubmitLogin, got {action:?}");
        };
        assert_eq!(form, CredentialForm::new("R100", "2005-03-01"));
    }

    #[test]
    fn empty_field_shows_inline_error_without_request() {
        let mut screen = LoginScreen::new(None);
        type_str(&mut screen, "R100");

        assert!(press(&mut screen, KeyCode::Enter).is_none());
        assert_eq!(screen.error.as_deref(), Some("Date of birth is required"));
        assert!(screen_text(&screen).contains("Date of birth is required"));
    }

    #[test]
    fn submit_ignored_while_loading() {
        let mut screen = LoginScreen::new(Some("R100".into()));
        type_str(&mut screen, "2005-03-01");
        screen.update(&logging_in()).unwrap();

        assert!(press(&mut screen, KeyCode::Enter).is_none());
        assert!(screen_text(&screen).contains("Logging in"));
    }

    #[test]
    fn second_enter_before_portal_update_sends_nothing() {
        let mut screen = LoginScreen::new(Some("R100".into()));
        type_str(&mut screen, "2005-03-01");

        assert!(matches!(
            press(&mut screen, KeyCode::Enter),
            Some(Action::SubmitLogin(_))
        ));
        assert!(press(&mut screen, KeyCode::Enter).is_none());

        screen
            .update(&Action::PortalUpdated(Arc::new(PortalState::LoggedOut {
                error: Some("Invalid credentials".into()),
            })))
            .unwrap();
        assert!(matches!(
            press(&mut screen, KeyCode::Enter),
            Some(Action::SubmitLogin(_))
        ));
    }

    #[test]
    fn portal_error_is_shown_and_cleared_by_next_attempt() {
        let mut screen = LoginScreen::new(Some("R100".into()));
        screen
            .update(&Action::PortalUpdated(Arc::new(PortalState::LoggedOut {
                error: Some("Invalid credentials".into()),
            })))
            .unwrap();
        assert!(screen_text(&screen).contains("Invalid credentials"));

        screen.update(&logging_in()).unwrap();
        assert_eq!(screen.error, None);
    }

    #[test]
    fn successful_login_clears_birthday_and_keeps_roll_number() {
        let mut screen = LoginScreen::new(None);
        type_str(&mut screen, "R100");
        press(&mut screen, KeyCode::Tab);
        type_str(&mut screen, "2005-03-01");

        let mut store = rollbook_core::Store::new();
        let request = store.next_request();
        store.apply(rollbook_core::PortalEvent::LoginStarted { request });
        store.apply(rollbook_core::PortalEvent::LoginSucceeded {
            request,
            result: rollbook_core::LoginResult {
                name: "Jane Doe".into(),
                reg_no: "R100".into(),
                session_list: vec!["2023-24".into()],
            },
        });
        screen
            .update(&Action::PortalUpdated(Arc::new(store.state().clone())))
            .unwrap();
        screen
            .update(&Action::PortalUpdated(Arc::new(PortalState::default())))
            .unwrap();

        assert_eq!(screen.roll_input, "R100");
        assert_eq!(screen.birthday_input, "");
        assert_eq!(screen.field, Field::Birthday);
    }

    #[test]
    fn known_roll_number_focuses_birthday() {
        let mut screen = LoginScreen::new(Some("R100".into()));
        type_str(&mut screen, "2005");
        assert_eq!(screen.roll_input, "R100");
        assert_eq!(screen.birthday_input, "2005");
    }

    #[test]
    fn backspace_edits_active_field() {
        let mut screen = LoginScreen::new(None);
        type_str(&mut screen, "R10");
        press(&mut screen, KeyCode::Backspace);
        assert_eq!(screen.roll_input, "R1");
    }
}
