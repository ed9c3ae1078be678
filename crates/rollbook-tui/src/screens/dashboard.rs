//! Dashboard: the student's sessions on the left, details for the
//! selected session on the right.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table,
};

use rollbook_core::{Dashboard, DetailStatus, PortalState, Selection, StudentDetails};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct DashboardScreen {
    dashboard: Option<Dashboard>,
    cursor: usize,
    /// Session sent to the portal whose fetch hasn't shown up in state yet.
    requested: Option<String>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            dashboard: None,
            cursor: 0,
            requested: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn sessions(&self) -> &[String] {
        self.dashboard
            .as_ref()
            .map_or(&[], |d| d.student.session_list.as_slice())
    }

    fn is_loading(&self) -> bool {
        self.requested.is_some() || self.dashboard.as_ref().is_some_and(Dashboard::is_loading)
    }

    fn open_selected(&mut self) -> Option<Action> {
        let session = self.sessions().get(self.cursor).cloned()?;
        self.requested = Some(session.clone());
        Some(Action::OpenSession(session))
    }

    fn move_cursor(&mut self, down: bool) {
        let len = self.sessions().len();
        if len == 0 {
            return;
        }
        self.cursor = if down {
            (self.cursor + 1).min(len - 1)
        } else {
            self.cursor.saturating_sub(1)
        };
    }

    fn apply_state(&mut self, state: &PortalState) {
        let next = state.dashboard().cloned();
        let same_student = match (&self.dashboard, &next) {
            (Some(a), Some(b)) => a.student == b.student,
            _ => false,
        };
        if !same_student {
            self.cursor = 0;
        }
        if let Some(requested) = &self.requested {
            // Selecting alone leaves the detail idle; wait for the fetch.
            let picked_up = next.as_ref().is_none_or(|dash| match &dash.selection {
                Selection::Selected { session, detail } => {
                    session == requested && !matches!(detail, DetailStatus::Idle)
                }
                Selection::None => false,
            });
            if picked_up {
                self.requested = None;
            }
        }
        self.dashboard = next;
    }
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DashboardScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('l') => Some(Action::Logout),
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(false);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(true);
                None
            }
            KeyCode::Enter if !self.is_loading() => self.open_selected(),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::PortalUpdated(state) => self.apply_state(state),
            Action::Tick if self.is_loading() => self.throbber_state.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(dash) = &self.dashboard else {
            return;
        };

        let [left, right] =
            Layout::horizontal([Constraint::Length(30), Constraint::Min(30)]).areas(area);
        let [info_area, sessions_area] =
            Layout::vertical([Constraint::Length(4), Constraint::Min(3)]).areas(left);

        render_student(frame, info_area, dash);
        self.render_sessions(frame, sessions_area, dash);
        self.render_details(frame, right, dash);
    }

    fn key_hints(&self) -> &'static str {
        "j/k move  Enter open  l logout  q quit"
    }
}

// ── Renderers ───────────────────────────────────────────────────────

impl DashboardScreen {
    fn render_sessions(&self, frame: &mut Frame, area: Rect, dash: &Dashboard) {
        let block = panel(" Sessions ", true);
        let sessions = &dash.student.session_list;

        if sessions.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No sessions on record", theme::label())).block(block),
                area,
            );
            return;
        }

        let selected = dash.selected_session();
        let items: Vec<ListItem> = sessions
            .iter()
            .map(|s| {
                let marker = if selected == Some(s.as_str()) { "\u{25cf} " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme::LABEL)),
                    Span::styled(s.as_str(), theme::text()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(theme::selected())
            .highlight_symbol("\u{25b8} ");
        let mut state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_details(&self, frame: &mut Frame, area: Rect, dash: &Dashboard) {
        let Selection::Selected { session, detail } = &dash.selection else {
            let block = panel(" Details ", false);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Select a session and press Enter",
                    theme::label(),
                ))
                .block(block),
                area,
            );
            return;
        };

        let block = panel(&format!(" Details \u{00b7} {session} "), false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match detail {
            DetailStatus::Idle => {}
            DetailStatus::Loading(_) => {
                let throbber = throbber_widgets_tui::Throbber::default()
                    .label(" Fetching details...")
                    .style(Style::default().fg(theme::HEADING))
                    .throbber_style(Style::default().fg(theme::ACCENT));
                let line = Rect::new(inner.x, inner.y, inner.width, 1.min(inner.height));
                frame.render_stateful_widget(throbber, line, &mut self.throbber_state.clone());
            }
            DetailStatus::Failed(message) => {
                frame.render_widget(
                    Paragraph::new(Span::styled(message.as_str(), theme::error())),
                    inner,
                );
            }
            DetailStatus::Loaded(details) => render_loaded(frame, inner, details),
        }
    }
}

fn render_student(frame: &mut Frame, area: Rect, dash: &Dashboard) {
    let lines = vec![
        field_line("Name", &dash.student.name),
        field_line("Reg No", &dash.student.reg_no),
    ];
    frame.render_widget(Paragraph::new(lines).block(panel(" Student ", false)), area);
}

fn render_loaded(frame: &mut Frame, area: Rect, details: &StudentDetails) {
    let [basic_area, academic_area, subjects_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(6),
        Constraint::Min(3),
    ])
    .areas(area);

    let basic = &details.basic;
    frame.render_widget(
        Paragraph::new(vec![
            heading("Basic"),
            field_line("Name", &basic.name),
            field_line("Reg No", &basic.reg_no),
            field_line("Gender", &basic.gender),
        ]),
        basic_area,
    );

    let academic = &details.academic;
    frame.render_widget(
        Paragraph::new(vec![
            heading("Academic"),
            field_line("Course", &academic.course),
            field_line("Stream", &academic.stream),
            field_line("Batch", &academic.batch),
            field_line("Section", &academic.section),
            field_line("Session", &academic.session),
        ]),
        academic_area,
    );

    let header = Row::new(["Subject", "Mode"]).style(theme::column_header());
    let rows: Vec<Row> = details
        .subjects
        .iter()
        .map(|s| {
            Row::new([
                Cell::from(s.name.as_str()),
                Cell::from(s.mode.as_str()),
            ])
            .style(theme::text())
        })
        .collect();
    let table = Table::new(rows, [Constraint::Fill(2), Constraint::Fill(1)])
        .header(header)
        .block(
            Block::default()
                .title(Span::styled(" Subjects ", theme::heading()))
                .borders(Borders::TOP)
                .border_style(theme::border()),
        );
    frame.render_widget(table, subjects_area);
}

fn panel(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(Span::styled(title.to_owned(), theme::heading()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::focused_border()
        } else {
            theme::border()
        })
}

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    ))
}

fn field_line<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {label:<9}"), theme::label()),
        Span::styled(value, theme::text()),
    ])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    use rollbook_core::{AcademicInfo, BasicInfo, LoginResult, PortalEvent, Store, Subject};

    use super::*;

    fn jane() -> LoginResult {
        LoginResult {
            name: "Jane Doe".into(),
            reg_no: "R100".into(),
            session_list: vec!["2023-24".into(), "2024-25".into()],
        }
    }

    fn details() -> StudentDetails {
        StudentDetails {
            basic: BasicInfo {
                name: "Jane Doe".into(),
                reg_no: "R100".into(),
                gender: "Female".into(),
            },
            academic: AcademicInfo {
                course: "BA".into(),
                stream: "Arts".into(),
                batch: "2023".into(),
                section: "B".into(),
                session: "2024-25".into(),
            },
            subjects: vec![Subject {
                name: "History".into(),
                mode: "Theory".into(),
            }],
        }
    }

    /// Drive a store through login, then apply `events` built from the
    /// details request id.
    fn state_after(events: impl FnOnce(&mut Store)) -> Action {
        let mut store = Store::new();
        let request = store.next_request();
        store.apply(PortalEvent::LoginStarted { request });
        store.apply(PortalEvent::LoginSucceeded {
            request,
            result: jane(),
        });
        events(&mut store);
        Action::PortalUpdated(Arc::new(store.state().clone()))
    }

    fn select_and_start(store: &mut Store) -> rollbook_core::RequestId {
        store.apply(PortalEvent::SessionSelected {
            session: "2024-25".into(),
        });
        let request = store.next_request();
        store.apply(PortalEvent::DetailsStarted { request });
        request
    }

    fn press(screen: &mut DashboardScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn screen_text(screen: &DashboardScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
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
    fn enter_opens_session_under_cursor() {
        let mut screen = DashboardScreen::new();
        screen.update(&state_after(|_| {})).unwrap();

        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        let action = press(&mut screen, KeyCode::Enter);

        let Some(Action::OpenSession(session)) = action else {
            panic!("expected OpenSession, got {action:?}");
        };
        assert_eq!(session, "2024-25");
    }

    #[test]
    fn enter_ignored_while_details_load() {
        let mut screen = DashboardScreen::new();
        screen
            .update(&state_after(|store| {
                select_and_start(store);
            }))
            .unwrap();

        assert!(press(&mut screen, KeyCode::Enter).is_none());
        assert!(screen_text(&screen).contains("Fetching details"));
    }

    #[test]
    fn second_enter_waits_for_the_fetch_to_settle() {
        let mut screen = DashboardScreen::new();
        screen.update(&state_after(|_| {})).unwrap();
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);

        assert!(matches!(
            press(&mut screen, KeyCode::Enter),
            Some(Action::OpenSession(_))
        ));
        assert!(press(&mut screen, KeyCode::Enter).is_none());

        // Selected but not yet fetching: still waiting.
        screen
            .update(&state_after(|store| {
                store.apply(PortalEvent::SessionSelected {
                    session: "2024-25".into(),
                });
            }))
            .unwrap();
        assert!(press(&mut screen, KeyCode::Enter).is_none());

        screen
            .update(&state_after(|store| {
                let request = select_and_start(store);
                store.apply(PortalEvent::DetailsLoaded {
                    request,
                    details: Box::new(details()),
                });
            }))
            .unwrap();
        assert!(matches!(
            press(&mut screen, KeyCode::Enter),
            Some(Action::OpenSession(_))
        ));
    }

    #[test]
    fn logout_key_emits_logout() {
        let mut screen = DashboardScreen::new();
        screen.update(&state_after(|_| {})).unwrap();
        assert!(matches!(
            press(&mut screen, KeyCode::Char('l')),
            Some(Action::Logout)
        ));
    }

    #[test]
    fn renders_student_and_sessions() {
        let mut screen = DashboardScreen::new();
        screen.update(&state_after(|_| {})).unwrap();

        let text = screen_text(&screen);
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("R100"));
        assert!(text.contains("2023-24"));
        assert!(text.contains("2024-25"));
        assert!(text.contains("Select a session"));
    }

    #[test]
    fn renders_loaded_details() {
        let mut screen = DashboardScreen::new();
        screen
            .update(&state_after(|store| {
                let request = select_and_start(store);
                store.apply(PortalEvent::DetailsLoaded {
                    request,
                    details: Box::new(details()),
                });
            }))
            .unwrap();

        let text = screen_text(&screen);
        assert!(text.contains("Female"));
        assert!(text.contains("Arts"));
        assert!(text.contains("History"));
        assert!(text.contains("Theory"));
    }

    #[test]
    fn renders_details_failure() {
        let mut screen = DashboardScreen::new();
        screen
            .update(&state_after(|store| {
                let request = select_and_start(store);
                store.apply(PortalEvent::DetailsFailed {
                    request,
                    message: "Failed to fetch details".into(),
                });
            }))
            .unwrap();

        assert!(screen_text(&screen).contains("Failed to fetch details"));
        // A failed fetch can be retried.
        press(&mut screen, KeyCode::Down);
        assert!(matches!(
            press(&mut screen, KeyCode::Enter),
            Some(Action::OpenSession(_))
        ));
    }

    #[test]
    fn logout_clears_dashboard_and_cursor() {
        let mut screen = DashboardScreen::new();
        screen.update(&state_after(|_| {})).unwrap();
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.cursor, 1);

        screen
            .update(&Action::PortalUpdated(Arc::new(PortalState::default())))
            .unwrap();
        assert_eq!(screen.cursor, 0);
        assert!(screen.dashboard.is_none());
        assert!(press(&mut screen, KeyCode::Enter).is_none());
    }
}
