//! Pull Request Middleware
//!
//! Opens the detail view for a dashboard card and runs the triage
//! operations on its pull requests:
//!
//! - `OpenDetail` loads the repository and its open pull requests
//! - `ConfirmMerge` squash-merges the selected pull request
//! - `Reject` arms on the first press and closes on the second
//!
//! Every opening of the detail view is a new session; results carry the
//! session they were started for so the reducer can drop stale ones.
//!
//! At most one merge or reject runs at a time. The guard lives here rather
//! than in the state snapshot, which lags behind the reducers, and is released
//! when the matching `MergeFinished` or `RejectFinished` passes through.

use crate::actions::{Action, DashboardAction, GlobalAction, RepoDetailAction, StatusBarAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::pr_triage::{load_detail, merge, reject};
use crate::session_manager::SharedClientManager;
use crate::state::{AppState, TriageDecision};
use crate::utils::browser::open_url;
use crate::views::RepoDetailView;
use gh_client::{ClientResult, GitHubClient, PullRequest, RepositoryName};
use std::sync::Arc;
use tokio::runtime::Runtime;

const SOURCE: &str = "Pull Requests";

pub struct PullRequestMiddleware {
    runtime: Runtime,
    clients: SharedClientManager,
    session: u64,
    /// Session and number of the running merge or reject
    in_flight: Option<(u64, u64)>,
}

impl PullRequestMiddleware {
    pub fn new(clients: SharedClientManager) -> Self {
        Self {
            runtime: Runtime::new().expect("Failed to create tokio runtime"),
            clients,
            session: 0,
            in_flight: None,
        }
    }

    /// Client and parsed name for an operation, reported on the status bar when missing
    fn target(
        &self,
        full_name: &str,
        dispatcher: &Dispatcher,
    ) -> Option<(Arc<dyn GitHubClient>, RepositoryName)> {
        let resolved = RepositoryName::parse(full_name).and_then(|name| {
            let client: ClientResult<Arc<dyn GitHubClient>> = self
                .clients
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .client();
            client.map(|client| (client, name))
        });

        match resolved {
            Ok(target) => Some(target),
            Err(e) => {
                log::warn!("PullRequestMiddleware: Cannot reach {}: {}", full_name, e);
                dispatcher.dispatch(Action::StatusBar(StatusBarAction::error(
                    e.to_string(),
                    SOURCE,
                )));
                None
            }
        }
    }

    fn open_detail(&mut self, state: &AppState, dispatcher: &Dispatcher) {
        let Some(summary) = state.dashboard.selected_summary() else {
            return;
        };

        if summary.error {
            dispatcher.dispatch(Action::StatusBar(StatusBarAction::warning(
                format!("{} could not be loaded. Refresh it first.", summary.full_name),
                SOURCE,
            )));
            return;
        }

        let Some((client, name)) = self.target(&summary.full_name, dispatcher) else {
            return;
        };

        self.session += 1;
        let session = self.session;
        log::info!("PullRequestMiddleware: Opening {} (session {})", name, session);

        dispatcher.dispatch(Action::RepoDetail(RepoDetailAction::Open {
            session,
            full_name: summary.full_name.clone(),
            html_url: summary.html_url.clone(),
        }));
        dispatcher.dispatch(Action::Global(GlobalAction::PushView(Box::new(
            RepoDetailView::new(),
        ))));

        let dispatcher = dispatcher.clone();
        self.runtime.spawn(async move {
            let action = match load_detail(client.as_ref(), &name).await {
                Ok(detail) => RepoDetailAction::Loaded { session, detail },
                Err(e) => {
                    log::warn!("Failed to load pull requests of {}: {}", name, e);
                    RepoDetailAction::LoadFailed {
                        session,
                        message: e.to_string(),
                    }
                }
            };
            dispatcher.dispatch(Action::RepoDetail(action));
        });
    }

    fn merge_selected(&mut self, state: &AppState, dispatcher: &Dispatcher) {
        let detail = &state.repo_detail;
        if self.in_flight.is_some() || !detail.merge_prompt || detail.is_busy() {
            return;
        }
        let Some(number) = detail.selected_pull_request().map(|pr| pr.number) else {
            return;
        };
        let Some((client, name)) = self.target(&detail.full_name, dispatcher) else {
            return;
        };

        let session = detail.session;
        self.in_flight = Some((session, number));
        dispatcher.dispatch(Action::RepoDetail(RepoDetailAction::MergeStarted {
            session,
            number,
        }));
        dispatcher.dispatch(Action::StatusBar(StatusBarAction::running(
            format!("Merging PR #{}...", number),
            SOURCE,
        )));

        let dispatcher = dispatcher.clone();
        self.runtime.spawn(async move {
            let result = merge(client.as_ref(), &name, number).await;
            let status = match &result {
                Ok(()) => StatusBarAction::success(format!("Merged {}#{}", name, number), SOURCE),
                Err(e) => StatusBarAction::error(
                    format!("Failed to merge {}#{}: {}", name, number, e),
                    SOURCE,
                ),
            };
            dispatcher.dispatch(Action::RepoDetail(RepoDetailAction::MergeFinished {
                session,
                number,
                result,
            }));
            dispatcher.dispatch(Action::StatusBar(status));
        });
    }

    fn reject_selected(&mut self, pull_request: PullRequest, state: &AppState, dispatcher: &Dispatcher) {
        let detail = &state.repo_detail;
        let Some((client, name)) = self.target(&detail.full_name, dispatcher) else {
            return;
        };

        let session = detail.session;
        let number = pull_request.number;
        self.in_flight = Some((session, number));
        dispatcher.dispatch(Action::RepoDetail(RepoDetailAction::RejectStarted {
            session,
            number,
        }));
        dispatcher.dispatch(Action::StatusBar(StatusBarAction::running(
            format!("Closing PR #{}...", number),
            SOURCE,
        )));

        let dispatcher = dispatcher.clone();
        self.runtime.spawn(async move {
            let result = reject(client.as_ref(), &name, &pull_request).await;
            let status = match &result {
                Ok(_) => StatusBarAction::success(format!("Closed {}#{}", name, number), SOURCE),
                Err(e) => StatusBarAction::error(
                    format!("Failed to close {}#{}: {}", name, number, e),
                    SOURCE,
                ),
            };
            dispatcher.dispatch(Action::RepoDetail(RepoDetailAction::RejectFinished {
                session,
                number,
                result,
            }));
            dispatcher.dispatch(Action::StatusBar(status));
        });
    }
}

impl Middleware for PullRequestMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        match action {
            Action::Dashboard(DashboardAction::OpenDetail) => {
                self.open_detail(state, dispatcher);
                false
            }
            Action::RepoDetail(RepoDetailAction::ConfirmMerge) => {
                self.merge_selected(state, dispatcher);
                // The reducer still closes the prompt
                true
            }
            Action::RepoDetail(RepoDetailAction::Reject) if self.in_flight.is_some() => {
                log::debug!("PullRequestMiddleware: Operation already running, ignoring reject");
                false
            }
            Action::RepoDetail(RepoDetailAction::Reject) => match state.repo_detail.reject_decision() {
                TriageDecision::Ignore => false,
                TriageDecision::Arm => {
                    if let Some(pr) = state.repo_detail.selected_pull_request() {
                        dispatcher.dispatch(Action::StatusBar(StatusBarAction::warning(
                            format!("Press x again to reject PR #{}", pr.number),
                            SOURCE,
                        )));
                    }
                    true
                }
                TriageDecision::Start(pull_request) => {
                    self.reject_selected(pull_request, state, dispatcher);
                    false
                }
            },
            Action::RepoDetail(
                RepoDetailAction::MergeFinished { session, number, .. }
                | RepoDetailAction::RejectFinished { session, number, .. },
            ) => {
                if self.in_flight == Some((*session, *number)) {
                    self.in_flight = None;
                }
                true
            }
            Action::RepoDetail(RepoDetailAction::OpenInBrowser) => {
                let detail = &state.repo_detail;
                let url = detail
                    .selected_pull_request()
                    .map(|pr| pr.html_url.clone())
                    .unwrap_or_else(|| detail.html_url.clone());
                if !url.is_empty() {
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
    use crate::domain_models::RepositorySummary;
    use crate::state::{DetailLoad, RepoDetailState};
    use crate::test_support::{client_manager, pull_request, repository, FakeClient};
    use pretty_assertions::assert_eq;
    use std::sync::mpsc::{channel, Receiver};
    use std::time::Duration;

    fn signed_in(client: Arc<FakeClient>) -> PullRequestMiddleware {
        let (clients, _) = client_manager(client);
        clients.write().unwrap().initialize("ghp_test").unwrap();
        PullRequestMiddleware::new(clients)
    }

    fn detail_state(reject_armed: bool) -> AppState {
        let mut state = AppState::default();
        state.repo_detail = RepoDetailState {
            load: DetailLoad::Loaded,
            pull_requests: vec![pull_request(7, Some("a/b"), "feature")],
            selected: Some(0),
            reject_armed,
            ..RepoDetailState::open(1, "a/b".to_string(), "https://github.com/a/b".to_string())
        };
        state
    }

    fn wait_for(rx: &Receiver<Action>, done: impl Fn(&Action) -> bool) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = rx.recv_timeout(Duration::from_secs(5)) {
            let finished = done(&action);
            actions.push(action);
            if finished {
                break;
            }
        }
        actions
    }

    #[test]
    fn test_first_reject_press_only_arms() {
        let client = Arc::new(FakeClient::new());
        let mut middleware = signed_in(Arc::clone(&client));
        let (tx, rx) = channel();
        let dispatcher = Dispatcher::new(tx);

        let action = Action::RepoDetail(RepoDetailAction::Reject);
        assert!(middleware.handle(&action, &detail_state(false), &dispatcher));
        drop(dispatcher);

        let actions: Vec<Action> = rx.iter().collect();
        assert!(!actions
            .iter()
            .any(|a| matches!(a, Action::RepoDetail(RepoDetailAction::RejectStarted { .. }))));
        assert!(client.calls().is_empty());
    }

    #[test]
    fn test_second_reject_press_closes_and_deletes_branch() {
        let client = Arc::new(FakeClient::new());
        let mut middleware = signed_in(Arc::clone(&client));
        let (tx, rx) = channel();
        let dispatcher = Dispatcher::new(tx);

        let action = Action::RepoDetail(RepoDetailAction::Reject);
        assert!(!middleware.handle(&action, &detail_state(true), &dispatcher));

        let actions = wait_for(&rx, |a| {
            matches!(a, Action::RepoDetail(RepoDetailAction::RejectFinished { .. }))
        });
        assert!(matches!(
            actions[0],
            Action::RepoDetail(RepoDetailAction::RejectStarted {
                session: 1,
                number: 7
            })
        ));
        assert!(actions.iter().any(|a| matches!(
            a,
            Action::RepoDetail(RepoDetailAction::RejectFinished {
                result: Ok(true),
                ..
            })
        )));
        assert_eq!(
            client.calls(),
            vec!["close a/b#7", "delete a/b heads/feature"]
        );
    }

    #[test]
    fn test_confirm_merge_needs_open_prompt() {
        let client = Arc::new(FakeClient::new());
        let mut middleware = signed_in(Arc::clone(&client));
        let (tx, rx) = channel();
        let dispatcher = Dispatcher::new(tx);

        let action = Action::RepoDetail(RepoDetailAction::ConfirmMerge);
        assert!(middleware.handle(&action, &detail_state(false), &dispatcher));
        drop(dispatcher);
        assert!(rx.iter().next().is_none());

        let mut state = detail_state(false);
        state.repo_detail.merge_prompt = true;
        let (tx, rx) = channel();
        let dispatcher = Dispatcher::new(tx);
        middleware.handle(&action, &state, &dispatcher);

        wait_for(&rx, |a| {
            matches!(a, Action::RepoDetail(RepoDetailAction::MergeFinished { .. }))
        });
        assert_eq!(client.calls(), vec!["merge a/b#7"]);
    }

    #[test]
    fn test_repeated_reject_on_unchanged_state_closes_once() {
        let client = Arc::new(FakeClient::new());
        let mut middleware = signed_in(Arc::clone(&client));
        let (tx, rx) = channel();
        let dispatcher = Dispatcher::new(tx);
        let state = detail_state(true);

        let action = Action::RepoDetail(RepoDetailAction::Reject);
        assert!(!middleware.handle(&action, &state, &dispatcher));
        assert!(!middleware.handle(&action, &state, &dispatcher));

        wait_for(&rx, |a| {
            matches!(a, Action::RepoDetail(RepoDetailAction::RejectFinished { .. }))
        });
        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(
            client.calls(),
            vec!["close a/b#7", "delete a/b heads/feature"]
        );
    }

    #[test]
    fn test_repeated_confirm_merge_merges_once() {
        let client = Arc::new(FakeClient::new());
        let mut middleware = signed_in(Arc::clone(&client));
        let (tx, rx) = channel();
        let dispatcher = Dispatcher::new(tx);
        let mut state = detail_state(false);
        state.repo_detail.merge_prompt = true;

        let action = Action::RepoDetail(RepoDetailAction::ConfirmMerge);
        middleware.handle(&action, &state, &dispatcher);
        middleware.handle(&action, &state, &dispatcher);

        wait_for(&rx, |a| {
            matches!(a, Action::RepoDetail(RepoDetailAction::MergeFinished { .. }))
        });
        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(client.calls(), vec!["merge a/b#7"]);
    }

    #[test]
    fn test_finished_reject_releases_the_guard() {
        let client = Arc::new(FakeClient::new());
        let mut middleware = signed_in(Arc::clone(&client));
        let (tx, rx) = channel();
        let dispatcher = Dispatcher::new(tx);
        let state = detail_state(true);
        let action = Action::RepoDetail(RepoDetailAction::Reject);

        middleware.handle(&action, &state, &dispatcher);
        let actions = wait_for(&rx, |a| {
            matches!(a, Action::RepoDetail(RepoDetailAction::RejectFinished { .. }))
        });

        // Results of another pull request leave the guard in place
        let other = Action::RepoDetail(RepoDetailAction::RejectFinished {
            session: 1,
            number: 8,
            result: Ok(false),
        });
        assert!(middleware.handle(&other, &state, &dispatcher));
        assert!(!middleware.handle(&action, &state, &dispatcher));

        let finished = actions.last().unwrap();
        assert!(middleware.handle(finished, &state, &dispatcher));
        middleware.handle(&action, &state, &dispatcher);
        wait_for(&rx, |a| {
            matches!(a, Action::RepoDetail(RepoDetailAction::RejectFinished { .. }))
        });
        assert_eq!(
            client.calls(),
            vec![
                "close a/b#7",
                "delete a/b heads/feature",
                "close a/b#7",
                "delete a/b heads/feature"
            ]
        );
    }

    #[test]
    fn test_open_detail_starts_new_session() {
        let client = Arc::new(
            FakeClient::new()
                .with_repository("a/b", 1)
                .with_pull_requests("a/b", vec![pull_request(3, Some("a/b"), "fix")]),
        );
        let mut middleware = signed_in(client);
        let (tx, rx) = channel();
        let dispatcher = Dispatcher::new(tx);
        let mut state = AppState::default();
        state.dashboard.summaries = vec![RepositorySummary::from_repository(repository("a/b"), 1)];

        let action = Action::Dashboard(DashboardAction::OpenDetail);
        assert!(!middleware.handle(&action, &state, &dispatcher));

        let actions = wait_for(&rx, |a| {
            matches!(a, Action::RepoDetail(RepoDetailAction::Loaded { .. }))
        });
        assert!(matches!(
            actions[0],
            Action::RepoDetail(RepoDetailAction::Open { session: 1, .. })
        ));
        assert!(matches!(actions[1], Action::Global(GlobalAction::PushView(_))));
        match actions.last() {
            Some(Action::RepoDetail(RepoDetailAction::Loaded { session, detail })) => {
                assert_eq!(*session, 1);
                assert_eq!(detail.pull_requests.len(), 1);
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_failed_card_does_not_open() {
        let mut middleware = signed_in(Arc::new(FakeClient::new()));
        let (tx, rx) = channel();
        let dispatcher = Dispatcher::new(tx);
        let mut state = AppState::default();
        state.dashboard.summaries = vec![RepositorySummary::failed("a/b", 0)];

        middleware.handle(&Action::Dashboard(DashboardAction::OpenDetail), &state, &dispatcher);
        drop(dispatcher);

        let actions: Vec<Action> = rx.iter().collect();
        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], Action::StatusBar(_)));
    }
}
