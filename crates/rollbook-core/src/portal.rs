// ── Portal ──
//
// Async facade over the records client and the portal store. Every
// operation follows the same shape: check preconditions and stamp a
// request id under the store lock, release the lock for the network
// call, then apply the outcome. The store drops outcomes whose id no
// longer matches, so the lock is never held across `.await`.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use rollbook_api::{LoginResult, RecordsClient, StudentDetails};

use crate::config::PortalConfig;
use crate::credentials::CredentialForm;
use crate::error::CoreError;
use crate::state::{PortalEvent, PortalState, RequestId, Selection, Store, View};

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<PortalInner>`. Clones share one state, so a
/// TUI can run requests on spawned tasks while rendering from
/// [`subscribe()`](Self::subscribe).
#[derive(Clone)]
pub struct Portal {
    inner: Arc<PortalInner>,
}

struct PortalInner {
    client: RecordsClient,
    store: Mutex<Store>,
    state_tx: watch::Sender<PortalState>,
}

impl Portal {
    /// Build a portal (and its HTTP client) from configuration.
    pub fn new(config: &PortalConfig) -> Result<Self, CoreError> {
        let client = RecordsClient::new(config.base_url.clone(), &config.transport())?;
        Ok(Self::with_client(client))
    }

    /// Build a portal around an existing records client.
    pub fn with_client(client: RecordsClient) -> Self {
        let (state_tx, _) = watch::channel(PortalState::default());
        Self {
            inner: Arc::new(PortalInner {
                client,
                store: Mutex::new(Store::new()),
                state_tx,
            }),
        }
    }

    // ── Observation ──────────────────────────────────────────────

    /// Snapshot of the current state.
    pub fn state(&self) -> PortalState {
        self.inner.state_tx.borrow().clone()
    }

    pub fn view(&self) -> View {
        self.inner.state_tx.borrow().view()
    }

    /// Receive every state change.
    pub fn subscribe(&self) -> watch::Receiver<PortalState> {
        self.inner.state_tx.subscribe()
    }

    // ── Operations ───────────────────────────────────────────────

    /// Validate the form and log in.
    ///
    /// Invalid input returns [`CoreError::ValidationFailed`] without a
    /// request or a state change. Otherwise the previous result and error
    /// are cleared before the request is sent, and the outcome moves the
    /// portal to the dashboard or back to the form with an error.
    pub async fn login(&self, form: &CredentialForm) -> Result<LoginResult, CoreError> {
        let credentials = form.validate()?;

        let request = {
            let mut store = self.inner.store.lock().await;
            let request = store.next_request();
            self.apply(&mut store, PortalEvent::LoginStarted { request });
            request
        };

        info!(roll_number = %credentials.roll_number, %request, "logging in");

        match self.inner.client.login(&credentials.to_request()).await {
            Ok(result) => {
                let applied = self
                    .dispatch(PortalEvent::LoginSucceeded {
                        request,
                        result: result.clone(),
                    })
                    .await;
                if !applied {
                    return Err(superseded(request));
                }
                info!(reg_no = %result.reg_no, sessions = result.session_list.len(), "logged in");
                Ok(result)
            }
            Err(e) => {
                warn!(
                    status = ?e.status(),
                    transport = e.is_transport(),
                    error = %e,
                    "login failed"
                );
                let err = CoreError::from_login(e);
                let applied = self
                    .dispatch(PortalEvent::LoginFailed {
                        request,
                        message: err.user_message(),
                    })
                    .await;
                if applied {
                    Err(err)
                } else {
                    Err(superseded(request))
                }
            }
        }
    }

    /// Select one of the sessions returned at login.
    pub async fn select_session(&self, session: &str) -> Result<(), CoreError> {
        let mut store = self.inner.store.lock().await;
        let Some(dash) = store.state().dashboard() else {
            return Err(CoreError::NotLoggedIn);
        };
        if !dash.student.has_session(session) {
            return Err(CoreError::UnknownSession {
                session: session.to_owned(),
            });
        }

        debug!(session, "session selected");
        self.apply(
            &mut store,
            PortalEvent::SessionSelected {
                session: session.to_owned(),
            },
        );
        Ok(())
    }

    /// Fetch details for the logged-in student and the selected session.
    ///
    /// Without a login or a selection this issues no request and returns
    /// [`CoreError::NotLoggedIn`] / [`CoreError::NoSessionSelected`].
    pub async fn fetch_details(&self) -> Result<StudentDetails, CoreError> {
        let (request, reg_no, session) = {
            let mut store = self.inner.store.lock().await;
            let Some(dash) = store.state().dashboard() else {
                return Err(CoreError::NotLoggedIn);
            };
            let Selection::Selected { session, .. } = &dash.selection else {
                return Err(CoreError::NoSessionSelected);
            };
            let reg_no = dash.student.reg_no.clone();
            let session = session.clone();

            let request = store.next_request();
            self.apply(&mut store, PortalEvent::DetailsStarted { request });
            (request, reg_no, session)
        };

        info!(%reg_no, %session, %request, "fetching student details");

        match self.inner.client.student_details(&reg_no, &session).await {
            Ok(details) => {
                let applied = self
                    .dispatch(PortalEvent::DetailsLoaded {
                        request,
                        details: Box::new(details.clone()),
                    })
                    .await;
                if applied {
                    Ok(details)
                } else {
                    Err(superseded(request))
                }
            }
            Err(e) => {
                warn!(
                    status = ?e.status(),
                    transport = e.is_transport(),
                    error = %e,
                    "details fetch failed"
                );
                let err = CoreError::from_details(e);
                let applied = self
                    .dispatch(PortalEvent::DetailsFailed {
                        request,
                        message: err.user_message(),
                    })
                    .await;
                if applied {
                    Err(err)
                } else {
                    Err(superseded(request))
                }
            }
        }
    }

    /// Select `session` and fetch its details.
    pub async fn open_session(&self, session: &str) -> Result<StudentDetails, CoreError> {
        self.select_session(session).await?;
        self.fetch_details().await
    }

    /// Back to the credential form. Result, selection and details are
    /// cleared; any in-flight response is discarded when it lands.
    pub async fn logout(&self) {
        self.dispatch(PortalEvent::LoggedOut).await;
        info!("logged out");
    }

    // ── Internals ────────────────────────────────────────────────

    async fn dispatch(&self, event: PortalEvent) -> bool {
        let mut store = self.inner.store.lock().await;
        self.apply(&mut store, event)
    }

    fn apply(&self, store: &mut Store, event: PortalEvent) -> bool {
        let applied = store.apply(event);
        if applied {
            self.inner.state_tx.send_replace(store.state().clone());
        }
        applied
    }
}

fn superseded(request: RequestId) -> CoreError {
    debug!(%request, "dropping stale response");
    CoreError::Superseded
}
