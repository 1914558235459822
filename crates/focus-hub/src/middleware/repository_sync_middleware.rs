//! Repository Sync Middleware
//!
//! Loads the dashboard cards whenever the watchlist changes or a reload is
//! requested, refreshes single cards and opens them in the browser.
//!
//! Each full load gets a new generation number; the dashboard reducer drops
//! results of a superseded load.

use crate::actions::{Action, DashboardAction, Event, StatusBarAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::repository_sync::{fetch_summary, load_all};
use crate::session_manager::SharedClientManager;
use crate::state::AppState;
use crate::utils::browser::open_url;
use gh_client::{ClientResult, GitHubClient};
use std::sync::Arc;
use tokio::runtime::Runtime;

const SOURCE: &str = "Dashboard";

pub struct RepositorySyncMiddleware {
    runtime: Runtime,
    clients: SharedClientManager,
    generation: u64,
}

impl RepositorySyncMiddleware {
    pub fn new(clients: SharedClientManager) -> Self {
        Self {
            runtime: Runtime::new().expect("Failed to create tokio runtime"),
            clients,
            generation: 0,
        }
    }

    fn client(&self) -> ClientResult<Arc<dyn GitHubClient>> {
        self.clients
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .client()
    }

    fn load(&mut self, watchlist: Vec<String>, dispatcher: &Dispatcher) {
        let client = match self.client() {
            Ok(client) => client,
            Err(e) => {
                log::warn!("RepositorySyncMiddleware: Cannot load repositories: {}", e);
                dispatcher.dispatch(Action::StatusBar(StatusBarAction::error(
                    format!("Cannot load repositories: {}", e),
                    SOURCE,
                )));
                return;
            }
        };

        self.generation += 1;
        let generation = self.generation;
        log::info!(
            "RepositorySyncMiddleware: Loading {} repositories (generation {})",
            watchlist.len(),
            generation
        );

        dispatcher.dispatch(Action::Dashboard(DashboardAction::LoadStarted {
            generation,
            watchlist: watchlist.clone(),
        }));

        let dispatcher = dispatcher.clone();
        self.runtime.spawn(async move {
            let summaries = load_all(client.as_ref(), &watchlist).await;
            dispatcher.dispatch(Action::Dashboard(DashboardAction::Loaded {
                generation,
                summaries,
            }));
        });
    }

    fn refresh(&self, full_name: String, dispatcher: &Dispatcher) {
        let client = match self.client() {
            Ok(client) => client,
            Err(e) => {
                dispatcher.dispatch(Action::StatusBar(StatusBarAction::error(
                    format!("Cannot refresh {}: {}", full_name, e),
                    SOURCE,
                )));
                return;
            }
        };

        dispatcher.dispatch(Action::Dashboard(DashboardAction::RefreshStarted {
            full_name: full_name.clone(),
        }));

        let dispatcher = dispatcher.clone();
        self.runtime.spawn(async move {
            let result = fetch_summary(client.as_ref(), &full_name).await;
            dispatcher.dispatch(Action::Dashboard(DashboardAction::RefreshFinished {
                full_name,
                result,
            }));
        });
    }
}

impl Middleware for RepositorySyncMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        match action {
            Action::Event(Event::WatchlistChanged { watchlist }) => {
                self.load(watchlist.clone(), dispatcher);
                true
            }
            Action::Dashboard(DashboardAction::ReloadAll) => {
                if state.session.is_authenticated() {
                    self.load(state.session.watchlist.clone(), dispatcher);
                }
                false
            }
            Action::Dashboard(DashboardAction::RefreshSelected) => {
                match state.dashboard.selected_summary() {
                    Some(summary) if !summary.loading => {
                        self.refresh(summary.full_name.clone(), dispatcher)
                    }
                    Some(summary) => {
                        log::debug!("{} is already loading", summary.full_name)
                    }
                    None => {}
                }
                false
            }
            Action::Dashboard(DashboardAction::OpenInBrowser) => {
                if let Some(summary) = state.dashboard.selected_summary() {
                    let url = summary.html_url.clone();
                    self.runtime.spawn(open_url(url));
                }
                false
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client_manager, FakeClient};
    use std::sync::mpsc::channel;
    use std::time::Duration;

    fn signed_in(client: FakeClient) -> RepositorySyncMiddleware {
        let (clients, _) = client_manager(Arc::new(client));
        clients.write().unwrap().initialize("ghp_test").unwrap();
        RepositorySyncMiddleware::new(clients)
    }

    fn watchlist_changed(entries: &[&str]) -> Action {
        Action::event(Event::WatchlistChanged {
            watchlist: entries.iter().map(|e| e.to_string()).collect(),
        })
    }

    #[test]
    fn test_each_load_gets_a_new_generation() {
        let mut middleware = signed_in(FakeClient::new().with_repository("a/b", 1));
        let (tx, rx) = channel();
        let dispatcher = Dispatcher::new(tx);
        let state = AppState::default();

        middleware.handle(&watchlist_changed(&["a/b"]), &state, &dispatcher);
        middleware.handle(&watchlist_changed(&["a/b"]), &state, &dispatcher);

        let mut started = Vec::new();
        let mut loaded = Vec::new();
        while loaded.len() < 2 {
            match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                Action::Dashboard(DashboardAction::LoadStarted { generation, .. }) => {
                    started.push(generation)
                }
                Action::Dashboard(DashboardAction::Loaded {
                    generation,
                    summaries,
                }) => {
                    assert_eq!(summaries.len(), 1);
                    loaded.push(generation);
                }
                _ => {}
            }
        }
        loaded.sort();
        assert_eq!(started, vec![1, 2]);
        assert_eq!(loaded, vec![1, 2]);
    }

    #[test]
    fn test_load_without_client_reports_error() {
        let (clients, _) = client_manager(Arc::new(FakeClient::new()));
        let mut middleware = RepositorySyncMiddleware::new(clients);
        let (tx, rx) = channel();
        let dispatcher = Dispatcher::new(tx);

        middleware.handle(&watchlist_changed(&["a/b"]), &AppState::default(), &dispatcher);
        drop(dispatcher);

        let actions: Vec<Action> = rx.iter().collect();
        assert_eq!(actions.len(), 1);
        assert!(matches!(
            actions[0],
            Action::StatusBar(StatusBarAction::Push { .. })
        ));
    }
}
