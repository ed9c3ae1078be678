// ── Portal state machine ──
//
// One state value replaces the scattered `data` / `error` / `loading`
// flags of a form-driven client. Loading and error are variants, never
// flags, so they cannot be set at the same time:
//
//   LoggedOut ──LoginStarted──▶ LoggingIn ──LoginSucceeded──▶ LoggedIn(no selection)
//       ▲                           │                               │ SessionSelected
//       └──────LoginFailed──────────┘                               ▼
//       ▲                                              LoggedIn(session selected)
//       │                                                 │ DetailsStarted
//       │                                                 ▼
//       │                                   Loading ──▶ Loaded | Failed
//       └────────────── LoggedOut (from any state) ───────────────┘

use std::fmt;

use tracing::debug;

use rollbook_api::{LoginResult, StudentDetails};

// ── RequestId ────────────────────────────────────────────────────

/// Generation stamp for one outstanding request.
///
/// A completion event only applies while the state still holds the same
/// id. Ids are never reused, so a late response from a superseded
/// request can't match newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ── View ─────────────────────────────────────────────────────────

/// The two mutually exclusive render modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    CredentialForm,
    Dashboard,
}

// ── PortalState ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalState {
    /// Credential form, optionally showing the last login error.
    LoggedOut { error: Option<String> },
    /// Credential form with a login request in flight.
    LoggingIn { request: RequestId },
    /// Dashboard for an authenticated student.
    LoggedIn(Dashboard),
}

impl Default for PortalState {
    fn default() -> Self {
        Self::LoggedOut { error: None }
    }
}

impl PortalState {
    pub fn view(&self) -> View {
        match self {
            Self::LoggedOut { .. } | Self::LoggingIn { .. } => View::CredentialForm,
            Self::LoggedIn(_) => View::Dashboard,
        }
    }

    /// Whether a request (login or details) is outstanding.
    pub fn is_loading(&self) -> bool {
        match self {
            Self::LoggingIn { .. } => true,
            Self::LoggedIn(dash) => dash.is_loading(),
            Self::LoggedOut { .. } => false,
        }
    }

    /// The error line to show, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::LoggedOut { error } => error.as_deref(),
            Self::LoggedIn(Dashboard {
                selection:
                    Selection::Selected {
                        detail: DetailStatus::Failed(message),
                        ..
                    },
                ..
            }) => Some(message),
            _ => None,
        }
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match self {
            Self::LoggedIn(dash) => Some(dash),
            _ => None,
        }
    }

    pub fn student(&self) -> Option<&LoginResult> {
        self.dashboard().map(|d| &d.student)
    }

    pub fn selected_session(&self) -> Option<&str> {
        self.dashboard().and_then(Dashboard::selected_session)
    }

    pub fn details(&self) -> Option<&StudentDetails> {
        self.dashboard().and_then(Dashboard::details)
    }
}

// ── Dashboard ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub student: LoginResult,
    pub selection: Selection,
}

impl Dashboard {
    pub fn new(student: LoginResult) -> Self {
        Self {
            student,
            selection: Selection::None,
        }
    }

    pub fn selected_session(&self) -> Option<&str> {
        match &self.selection {
            Selection::Selected { session, .. } => Some(session),
            Selection::None => None,
        }
    }

    pub fn details(&self) -> Option<&StudentDetails> {
        match &self.selection {
            Selection::Selected {
                detail: DetailStatus::Loaded(details),
                ..
            } => Some(details.as_ref()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.selection,
            Selection::Selected {
                detail: DetailStatus::Loading(_),
                ..
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    None,
    Selected {
        session: String,
        detail: DetailStatus,
    },
}

/// Details sub-state for the selected session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailStatus {
    Idle,
    Loading(RequestId),
    Failed(String),
    Loaded(Box<StudentDetails>),
}

// ── Events ───────────────────────────────────────────────────────

/// Reducer inputs.
#[derive(Debug, Clone)]
pub enum PortalEvent {
    LoginStarted {
        request: RequestId,
    },
    LoginSucceeded {
        request: RequestId,
        result: LoginResult,
    },
    LoginFailed {
        request: RequestId,
        message: String,
    },
    SessionSelected {
        session: String,
    },
    DetailsStarted {
        request: RequestId,
    },
    DetailsLoaded {
        request: RequestId,
        details: Box<StudentDetails>,
    },
    DetailsFailed {
        request: RequestId,
        message: String,
    },
    LoggedOut,
}

// ── Store ────────────────────────────────────────────────────────

/// The reducer: current state plus the request generation counter.
#[derive(Debug, Default)]
pub struct Store {
    state: PortalState,
    generation: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PortalState {
        &self.state
    }

    /// Allocate the id for a new request.
    pub fn next_request(&mut self) -> RequestId {
        self.generation += 1;
        RequestId(self.generation)
    }

    /// Apply one event. Returns `false` when the event does not fit the
    /// current state (stale completion, selection while logged out, ...)
    /// and the state is left untouched.
    pub fn apply(&mut self, event: PortalEvent) -> bool {
        let next = match (&self.state, event) {
            // A new attempt clears result, selection, details and error.
            (_, PortalEvent::LoginStarted { request }) => PortalState::LoggingIn { request },

            (PortalState::LoggingIn { request: current }, PortalEvent::LoginSucceeded { request, result })
                if *current == request =>
            {
                PortalState::LoggedIn(Dashboard::new(result))
            }

            (PortalState::LoggingIn { request: current }, PortalEvent::LoginFailed { request, message })
                if *current == request =>
            {
                PortalState::LoggedOut {
                    error: Some(message),
                }
            }

            (PortalState::LoggedIn(dash), PortalEvent::SessionSelected { session })
                if dash.student.has_session(&session) =>
            {
                if dash.selected_session() == Some(session.as_str()) {
                    return false;
                }
                PortalState::LoggedIn(Dashboard {
                    student: dash.student.clone(),
                    selection: Selection::Selected {
                        session,
                        detail: DetailStatus::Idle,
                    },
                })
            }

            (PortalState::LoggedIn(dash), PortalEvent::DetailsStarted { request }) => {
                let Selection::Selected { session, .. } = &dash.selection else {
                    return self.ignore("details started without a selection");
                };
                with_detail(dash, session, DetailStatus::Loading(request))
            }

            (PortalState::LoggedIn(dash), PortalEvent::DetailsLoaded { request, details })
                if dash.loading_request() == Some(request) =>
            {
                let session = dash.selected_session().unwrap_or_default().to_owned();
                with_detail(dash, &session, DetailStatus::Loaded(details))
            }

            (PortalState::LoggedIn(dash), PortalEvent::DetailsFailed { request, message })
                if dash.loading_request() == Some(request) =>
            {
                let session = dash.selected_session().unwrap_or_default().to_owned();
                with_detail(dash, &session, DetailStatus::Failed(message))
            }

            (_, PortalEvent::LoggedOut) => PortalState::LoggedOut { error: None },

            (_, event) => return self.ignore(&format!("{event:?}")),
        };

        debug!(from = ?self.state.view(), to = ?next.view(), "portal transition");
        self.state = next;
        true
    }

    fn ignore(&self, what: &str) -> bool {
        debug!(state = ?self.state.view(), event = what, "event ignored");
        false
    }
}

impl Dashboard {
    fn loading_request(&self) -> Option<RequestId> {
        match self.selection {
            Selection::Selected {
                detail: DetailStatus::Loading(request),
                ..
            } => Some(request),
            _ => None,
        }
    }
}

fn with_detail(dash: &Dashboard, session: &str, detail: DetailStatus) -> PortalState {
    PortalState::LoggedIn(Dashboard {
        student: dash.student.clone(),
        selection: Selection::Selected {
            session: session.to_owned(),
            detail,
        },
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rollbook_api::{AcademicInfo, BasicInfo, Subject};

    use super::*;

    fn jane() -> LoginResult {
        LoginResult {
            name: "Jane Doe".into(),
            reg_no: "R100".into(),
            session_list: vec!["2023-24".into(), "2024-25".into()],
        }
    }

    fn details(session: &str) -> StudentDetails {
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
                session: session.into(),
            },
            subjects: vec![Subject {
                name: "History".into(),
                mode: "Theory".into(),
            }],
        }
    }

    fn logged_in() -> Store {
        let mut store = Store::new();
        let request = store.next_request();
        assert!(store.apply(PortalEvent::LoginStarted { request }));
        assert!(store.apply(PortalEvent::LoginSucceeded {
            request,
            result: jane(),
        }));
        store
    }

    fn selected(session: &str) -> Store {
        let mut store = logged_in();
        assert!(store.apply(PortalEvent::SessionSelected {
            session: session.into(),
        }));
        store
    }

    #[test]
    fn starts_on_the_credential_form() {
        let store = Store::new();
        assert_eq!(store.state().view(), View::CredentialForm);
        assert!(!store.state().is_loading());
        assert_eq!(store.state().error(), None);
    }

    #[test]
    fn request_ids_are_never_reused() {
        let mut store = Store::new();
        let a = store.next_request();
        let b = store.next_request();
        assert!(b > a);
    }

    #[test]
    fn login_success_enters_dashboard_without_selection() {
        let store = logged_in();
        let state = store.state();
        assert_eq!(state.view(), View::Dashboard);
        assert_eq!(state.student(), Some(&jane()));
        assert_eq!(state.selected_session(), None);
        assert!(!state.is_loading());
    }

    #[test]
    fn login_failure_returns_to_form_with_error() {
        let mut store = Store::new();
        let request = store.next_request();
        store.apply(PortalEvent::LoginStarted { request });
        assert!(store.state().is_loading());
        assert_eq!(store.state().error(), None);

        assert!(store.apply(PortalEvent::LoginFailed {
            request,
            message: "Invalid credentials".into(),
        }));
        assert_eq!(store.state().view(), View::CredentialForm);
        assert_eq!(store.state().error(), Some("Invalid credentials"));
        assert!(!store.state().is_loading());
    }

    #[test]
    fn new_login_clears_previous_error() {
        let mut store = Store::new();
        let first = store.next_request();
        store.apply(PortalEvent::LoginStarted { request: first });
        store.apply(PortalEvent::LoginFailed {
            request: first,
            message: "Login failed".into(),
        });

        let second = store.next_request();
        store.apply(PortalEvent::LoginStarted { request: second });
        assert_eq!(
            store.state(),
            &PortalState::LoggingIn { request: second }
        );
        assert_eq!(store.state().error(), None);
    }

    #[test]
    fn stale_login_response_is_discarded() {
        let mut store = Store::new();
        let first = store.next_request();
        store.apply(PortalEvent::LoginStarted { request: first });
        let second = store.next_request();
        store.apply(PortalEvent::LoginStarted { request: second });

        assert!(!store.apply(PortalEvent::LoginSucceeded {
            request: first,
            result: jane(),
        }));
        assert_eq!(store.state(), &PortalState::LoggingIn { request: second });
    }

    #[test]
    fn login_response_after_logout_is_discarded() {
        let mut store = Store::new();
        let request = store.next_request();
        store.apply(PortalEvent::LoginStarted { request });
        store.apply(PortalEvent::LoggedOut);

        assert!(!store.apply(PortalEvent::LoginSucceeded {
            request,
            result: jane(),
        }));
        assert_eq!(store.state(), &PortalState::default());
    }

    #[test]
    fn selecting_unknown_session_is_ignored() {
        let mut store = logged_in();
        assert!(!store.apply(PortalEvent::SessionSelected {
            session: "1999-00".into(),
        }));
        assert_eq!(store.state().selected_session(), None);
    }

    #[test]
    fn selection_requires_login() {
        let mut store = Store::new();
        assert!(!store.apply(PortalEvent::SessionSelected {
            session: "2023-24".into(),
        }));
        assert_eq!(store.state(), &PortalState::default());
    }

    #[test]
    fn details_flow_loads_selected_session() {
        let mut store = selected("2023-24");
        let request = store.next_request();
        assert!(store.apply(PortalEvent::DetailsStarted { request }));
        assert!(store.state().is_loading());

        assert!(store.apply(PortalEvent::DetailsLoaded {
            request,
            details: Box::new(details("2023-24")),
        }));
        assert_eq!(store.state().details(), Some(&details("2023-24")));
        assert_eq!(store.state().selected_session(), Some("2023-24"));
        assert!(!store.state().is_loading());
    }

    #[test]
    fn details_failure_keeps_dashboard() {
        let mut store = selected("2024-25");
        let request = store.next_request();
        store.apply(PortalEvent::DetailsStarted { request });
        store.apply(PortalEvent::DetailsFailed {
            request,
            message: "Failed to fetch details".into(),
        });

        let state = store.state();
        assert_eq!(state.view(), View::Dashboard);
        assert_eq!(state.error(), Some("Failed to fetch details"));
        assert!(!state.is_loading());
        assert_eq!(state.details(), None);
    }

    #[test]
    fn details_without_selection_are_ignored() {
        let mut store = logged_in();
        let request = store.next_request();
        assert!(!store.apply(PortalEvent::DetailsStarted { request }));
        assert!(!store.state().is_loading());
    }

    #[test]
    fn switching_session_drops_in_flight_details() {
        let mut store = selected("2023-24");
        let request = store.next_request();
        store.apply(PortalEvent::DetailsStarted { request });
        store.apply(PortalEvent::SessionSelected {
            session: "2024-25".into(),
        });

        assert!(!store.apply(PortalEvent::DetailsLoaded {
            request,
            details: Box::new(details("2023-24")),
        }));
        assert_eq!(store.state().selected_session(), Some("2024-25"));
        assert_eq!(store.state().details(), None);
    }

    #[test]
    fn reselecting_same_session_keeps_details() {
        let mut store = selected("2023-24");
        let request = store.next_request();
        store.apply(PortalEvent::DetailsStarted { request });
        store.apply(PortalEvent::DetailsLoaded {
            request,
            details: Box::new(details("2023-24")),
        });

        assert!(!store.apply(PortalEvent::SessionSelected {
            session: "2023-24".into(),
        }));
        assert!(store.state().details().is_some());
    }

    #[test]
    fn logout_from_loaded_details_returns_to_form() {
        let mut store = selected("2023-24");
        let request = store.next_request();
        store.apply(PortalEvent::DetailsStarted { request });
        store.apply(PortalEvent::DetailsLoaded {
            request,
            details: Box::new(details("2023-24")),
        });

        assert!(store.apply(PortalEvent::LoggedOut));
        let state = store.state();
        assert_eq!(state, &PortalState::LoggedOut { error: None });
        assert_eq!(state.view(), View::CredentialForm);
        assert_eq!(state.selected_session(), None);
        assert_eq!(state.details(), None);
        assert_eq!(state.student(), None);
    }

    #[test]
    fn loading_and_error_never_coexist() {
        let mut store = selected("2023-24");
        let first = store.next_request();
        store.apply(PortalEvent::DetailsStarted { request: first });
        store.apply(PortalEvent::DetailsFailed {
            request: first,
            message: "Failed to fetch details".into(),
        });
        let retry = store.next_request();
        store.apply(PortalEvent::DetailsStarted { request: retry });

        assert!(store.state().is_loading());
        assert_eq!(store.state().error(), None);
    }
}
