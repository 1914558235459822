//! Session Middleware
//!
//! Owns the [`SessionManager`] and turns its outcomes into actions:
//!
//! - Startup on `Bootstrap::Start` (watchlist load, stored token check)
//! - Sign-in, retry of an unverified token and sign-out
//! - Watchlist add (with existence check) and remove
//!
//! Every mutation is followed by a `SessionAction::SnapshotUpdated` so the
//! reducers never see the session manager itself.
//!
//! The state a middleware sees lags behind the reducers, so repeated presses
//! are refused by flags owned here. A sign-in or retry stays in flight until
//! its snapshot comes back through the chain; an add until its result does.

use crate::actions::{
    Action, AddRepositoryAction, AuthAction, BootstrapAction, DashboardAction, Event,
    GlobalAction, SessionAction, StatusBarAction,
};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::session_manager::{
    AddOutcome, SessionError, SessionManager, SessionSnapshot, StartupOutcome,
};
use crate::state::AppState;
use crate::views::{AuthView, DashboardView};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::Mutex as TokioMutex;

const SOURCE: &str = "Session";

pub const STORED_TOKEN_REJECTED: &str = "Stored token was rejected. Please sign in again.";

pub struct SessionMiddleware {
    runtime: Runtime,
    manager: Arc<TokioMutex<SessionManager>>,
    auth_in_flight: bool,
    add_in_flight: bool,
}

impl SessionMiddleware {
    pub fn new(manager: SessionManager) -> Self {
        Self {
            runtime: Runtime::new().expect("Failed to create tokio runtime"),
            manager: Arc::new(TokioMutex::new(manager)),
            auth_in_flight: false,
            add_in_flight: false,
        }
    }

    fn startup(&self, dispatcher: &Dispatcher) {
        let manager = Arc::clone(&self.manager);
        let dispatcher = dispatcher.clone();

        self.runtime.spawn(async move {
            let mut manager = manager.lock().await;
            let outcome = manager.startup().await;
            let snapshot = manager.snapshot();
            drop(manager);

            dispatcher.dispatch(Action::Bootstrap(BootstrapAction::End));
            dispatch_verification(outcome, snapshot, &dispatcher);
        });
    }

    fn retry_verification(&mut self, dispatcher: &Dispatcher) {
        self.auth_in_flight = true;
        dispatcher.dispatch(Action::Auth(AuthAction::RetryStarted));

        let manager = Arc::clone(&self.manager);
        let dispatcher = dispatcher.clone();

        self.runtime.spawn(async move {
            let mut manager = manager.lock().await;
            if manager.is_authenticated() {
                log::debug!("SessionMiddleware: Already signed in, skipping retry");
                let snapshot = manager.snapshot();
                drop(manager);
                dispatcher.dispatch(Action::Session(SessionAction::SnapshotUpdated(snapshot)));
                return;
            }
            let outcome = manager.retry_verification().await;
            let snapshot = manager.snapshot();
            drop(manager);

            dispatch_verification(outcome, snapshot, &dispatcher);
        });
    }

    fn login(&mut self, token: String, dispatcher: &Dispatcher) {
        self.auth_in_flight = true;
        dispatcher.dispatch(Action::Auth(AuthAction::LoginStarted));

        let manager = Arc::clone(&self.manager);
        let dispatcher = dispatcher.clone();

        self.runtime.spawn(async move {
            let mut manager = manager.lock().await;
            if manager.is_authenticated() {
                log::debug!("SessionMiddleware: Already signed in, skipping sign-in");
                let snapshot = manager.snapshot();
                drop(manager);
                dispatcher.dispatch(Action::Session(SessionAction::SnapshotUpdated(snapshot)));
                return;
            }
            let result = manager.login(&token).await;
            let snapshot = manager.snapshot();
            drop(manager);

            match result {
                Ok(success) => {
                    dispatcher.dispatch(Action::Auth(AuthAction::LoginSucceeded));
                    if success.token_persisted {
                        dispatcher.dispatch(Action::StatusBar(StatusBarAction::success(
                            format!("Signed in as {}", success.user.login),
                            SOURCE,
                        )));
                    } else {
                        dispatcher.dispatch(Action::StatusBar(StatusBarAction::warning(
                            format!(
                                "Signed in as {}, but the token could not be saved",
                                success.user.login
                            ),
                            SOURCE,
                        )));
                    }
                    enter_dashboard(snapshot, &dispatcher);
                }
                Err(e) => {
                    dispatcher.dispatch(Action::Session(SessionAction::SnapshotUpdated(snapshot)));
                    let message = match &e {
                        SessionError::Client(client_error) if client_error.is_auth() => {
                            format!("Invalid token: {}", client_error)
                        }
                        _ => e.to_string(),
                    };
                    dispatcher.dispatch(Action::Auth(AuthAction::LoginFailed { message }));
                }
            }
        });
    }

    fn logout(&self, dispatcher: &Dispatcher) {
        let manager = Arc::clone(&self.manager);
        let dispatcher = dispatcher.clone();

        self.runtime.spawn(async move {
            let mut manager = manager.lock().await;
            let result = manager.logout();
            let snapshot = manager.snapshot();
            drop(manager);

            dispatcher.dispatch(Action::StatusBar(StatusBarAction::Clear));
            dispatcher.dispatch(Action::Session(SessionAction::SnapshotUpdated(snapshot)));
            dispatcher.dispatch(Action::Global(GlobalAction::ReplaceView(Box::new(
                AuthView::new(),
            ))));
            match result {
                Ok(()) => {
                    dispatcher.dispatch(Action::StatusBar(StatusBarAction::info("Signed out", SOURCE)))
                }
                Err(e) => dispatcher.dispatch(Action::StatusBar(StatusBarAction::error(
                    format!("Signed out, but the stored token could not be removed: {}", e),
                    SOURCE,
                ))),
            }
        });
    }

    fn add_repository(&mut self, full_name: String, dispatcher: &Dispatcher) {
        self.add_in_flight = true;
        dispatcher.dispatch(Action::AddRepository(AddRepositoryAction::Submitted {
            full_name: full_name.clone(),
        }));

        let manager = Arc::clone(&self.manager);
        let dispatcher = dispatcher.clone();

        self.runtime.spawn(async move {
            let mut manager = manager.lock().await;
            let result = manager.add_to_watchlist(&full_name).await;
            let snapshot = manager.snapshot();
            drop(manager);

            match result {
                Ok(AddOutcome::Added) => {
                    // Stored under GitHub's spelling, which is the last entry
                    let added = snapshot.watchlist.last().cloned().unwrap_or(full_name);
                    dispatcher.dispatch(Action::AddRepository(AddRepositoryAction::Succeeded {
                        full_name: added.clone(),
                    }));
                    dispatcher.dispatch(Action::StatusBar(StatusBarAction::success(
                        format!("Added {} to your watchlist", added),
                        SOURCE,
                    )));
                    publish_watchlist(snapshot, &dispatcher);
                }
                Ok(AddOutcome::AlreadyPresent) => {
                    dispatcher.dispatch(Action::AddRepository(AddRepositoryAction::Failed {
                        message: "Repository is already in your watchlist".to_string(),
                    }));
                }
                Err(e) => {
                    dispatcher.dispatch(Action::AddRepository(AddRepositoryAction::Failed {
                        message: e.to_string(),
                    }));
                }
            }
        });
    }

    fn remove_repository(&self, full_name: String, dispatcher: &Dispatcher) {
        let manager = Arc::clone(&self.manager);
        let dispatcher = dispatcher.clone();

        self.runtime.spawn(async move {
            let mut manager = manager.lock().await;
            let result = manager.remove_from_watchlist(&full_name);
            let snapshot = manager.snapshot();
            drop(manager);

            match result {
                Ok(true) => {
                    dispatcher.dispatch(Action::StatusBar(StatusBarAction::info(
                        format!("Removed {} from your watchlist", full_name),
                        SOURCE,
                    )));
                    publish_watchlist(snapshot, &dispatcher);
                }
                Ok(false) => {
                    dispatcher.dispatch(Action::StatusBar(StatusBarAction::warning(
                        format!("{} is not on your watchlist", full_name),
                        SOURCE,
                    )));
                    publish_watchlist(snapshot, &dispatcher);
                }
                Err(e) => dispatcher.dispatch(Action::StatusBar(StatusBarAction::error(
                    format!("Failed to remove {}: {}", full_name, e),
                    SOURCE,
                ))),
            }
        });
    }
}

/// Route a token check to the screen it calls for
fn dispatch_verification(outcome: StartupOutcome, snapshot: SessionSnapshot, dispatcher: &Dispatcher) {
    match outcome {
        StartupOutcome::Restored(user) => {
            dispatcher.dispatch(Action::Auth(AuthAction::LoginSucceeded));
            dispatcher.dispatch(Action::StatusBar(StatusBarAction::success(
                format!("Signed in as {}", user.login),
                SOURCE,
            )));
            enter_dashboard(snapshot, dispatcher);
        }
        StartupOutcome::NoToken => show_auth(snapshot, None, dispatcher),
        StartupOutcome::AuthRejected(reason) => {
            log::warn!("Stored token rejected: {}", reason);
            show_auth(
                snapshot,
                Some(AuthAction::LoginFailed {
                    message: STORED_TOKEN_REJECTED.to_string(),
                }),
                dispatcher,
            );
        }
        StartupOutcome::VerificationFailed(message) => {
            show_auth(snapshot, Some(AuthAction::VerificationFailed { message }), dispatcher);
        }
    }
}

fn show_auth(snapshot: SessionSnapshot, auth: Option<AuthAction>, dispatcher: &Dispatcher) {
    dispatcher.dispatch(Action::Session(SessionAction::SnapshotUpdated(snapshot)));
    dispatcher.dispatch(Action::Global(GlobalAction::ReplaceView(Box::new(
        AuthView::new(),
    ))));
    if let Some(auth) = auth {
        dispatcher.dispatch(Action::Auth(auth));
    }
}

fn enter_dashboard(snapshot: SessionSnapshot, dispatcher: &Dispatcher) {
    dispatcher.dispatch(Action::Global(GlobalAction::ReplaceView(Box::new(
        DashboardView::new(),
    ))));
    publish_watchlist(snapshot, dispatcher);
}

fn publish_watchlist(snapshot: SessionSnapshot, dispatcher: &Dispatcher) {
    let watchlist = snapshot.watchlist.clone();
    dispatcher.dispatch(Action::Session(SessionAction::SnapshotUpdated(snapshot)));
    dispatcher.dispatch(Action::event(Event::WatchlistChanged { watchlist }));
}

impl Middleware for SessionMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        match action {
            Action::Bootstrap(BootstrapAction::Start) => {
                log::info!("SessionMiddleware: Starting session");
                self.startup(dispatcher);
                true
            }
            Action::Auth(AuthAction::Submit) => {
                if self.auth_in_flight || state.auth.submitting {
                    log::debug!("SessionMiddleware: Sign-in already running");
                    return false;
                }
                self.login(state.auth.token_input.clone(), dispatcher);
                false
            }
            Action::Auth(AuthAction::RetryVerification) => {
                if self.auth_in_flight || state.auth.submitting {
                    log::debug!("SessionMiddleware: Verification already running");
                    return false;
                }
                self.retry_verification(dispatcher);
                false
            }
            Action::Session(SessionAction::SnapshotUpdated(_)) => {
                self.auth_in_flight = false;
                true
            }
            Action::AddRepository(
                AddRepositoryAction::Succeeded { .. } | AddRepositoryAction::Failed { .. },
            ) => {
                self.add_in_flight = false;
                true
            }
            Action::Session(SessionAction::Logout) => {
                self.logout(dispatcher);
                true
            }
            Action::AddRepository(AddRepositoryAction::Confirm) => {
                if self.add_in_flight || state.add_repo_form.is_submitting() {
                    return false;
                }
                self.add_repository(state.add_repo_form.normalized(), dispatcher);
                false
            }
            Action::Dashboard(DashboardAction::RemoveSelected) => {
                if let Some(summary) = state.dashboard.selected_summary() {
                    self.remove_repository(summary.full_name.clone(), dispatcher);
                }
                false
            }
            _ => true,
        }
    }
}
