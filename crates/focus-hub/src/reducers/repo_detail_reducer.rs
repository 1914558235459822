//! Repository Detail Reducer
//!
//! Results carry the session they were started for. Anything addressed to a
//! detail view that has since been closed or reopened is dropped here.

use std::time::Duration;

use gh_client::ClientError;

use crate::actions::RepoDetailAction;
use crate::state::{DetailLoad, RepoDetailState, StatusKind, TriageDecision, TriageOperation};

const MERGE_FAILED: &str = "Failed to merge PR.";
const REJECT_FAILED: &str = "Failed to reject PR. Check your permissions.";

/// The reason GitHub gave, or `fallback` when it gave none
fn failure_reason(error: &ClientError, fallback: &str) -> String {
    let reason = error.to_string();
    if reason.trim().is_empty() {
        fallback.to_string()
    } else {
        reason
    }
}

pub fn reduce_repo_detail(
    mut state: RepoDetailState,
    action: &RepoDetailAction,
    notice_lifetime: Duration,
) -> RepoDetailState {
    match action {
        RepoDetailAction::Open {
            session,
            full_name,
            html_url,
        } => {
            state = RepoDetailState::open(*session, full_name.clone(), html_url.clone());
        }
        RepoDetailAction::Loaded { session, detail } if *session == state.session => {
            state.html_url = detail.repository.html_url.clone();
            state.repository = Some(detail.repository.clone());
            state.pull_requests = detail.pull_requests.clone();
            state.selected = None;
            state.load = DetailLoad::Loaded;
        }
        RepoDetailAction::LoadFailed { session, message } if *session == state.session => {
            state.load = DetailLoad::Failed(message.clone());
        }

        RepoDetailAction::SelectNext => state.select_next(),
        RepoDetailAction::SelectPrevious => state.select_previous(),

        RepoDetailAction::RequestMerge if state.can_request_merge() => {
            state.merge_prompt = true;
            state.reject_armed = false;
        }
        RepoDetailAction::ConfirmMerge | RepoDetailAction::CancelMerge => {
            state.merge_prompt = false;
        }
        RepoDetailAction::MergeStarted { session, number } if *session == state.session => {
            state.in_flight = Some(TriageOperation::Merge(*number));
        }
        RepoDetailAction::MergeFinished {
            session,
            number,
            result,
        } if *session == state.session => {
            state.in_flight = None;
            match result {
                Ok(()) => {
                    state.remove_pull_request(*number);
                    state.show_notice(
                        StatusKind::Success,
                        format!("PR #{} merged successfully!", number),
                        notice_lifetime,
                    );
                }
                Err(e) => {
                    state.show_notice(StatusKind::Error, failure_reason(e, MERGE_FAILED), notice_lifetime);
                }
            }
        }

        RepoDetailAction::Reject => {
            if state.reject_decision() == TriageDecision::Arm {
                state.reject_armed = true;
            }
        }
        RepoDetailAction::RejectStarted { session, number } if *session == state.session => {
            state.in_flight = Some(TriageOperation::Reject(*number));
            state.reject_armed = false;
        }
        RepoDetailAction::RejectFinished {
            session,
            number,
            result,
        } if *session == state.session => {
            state.in_flight = None;
            match result {
                Ok(branch_deleted) => {
                    state.remove_pull_request(*number);
                    let mut message = format!("PR #{} closed successfully.", number);
                    if *branch_deleted {
                        message.push_str(" Branch deleted.");
                    }
                    state.show_notice(StatusKind::Success, message, notice_lifetime);
                }
                Err(e) => {
                    state.reject_armed = false;
                    state.show_notice(StatusKind::Error, failure_reason(e, REJECT_FAILED), notice_lifetime);
                }
            }
        }

        RepoDetailAction::Loaded { session, .. }
        | RepoDetailAction::LoadFailed { session, .. }
        | RepoDetailAction::MergeStarted { session, .. }
        | RepoDetailAction::MergeFinished { session, .. }
        | RepoDetailAction::RejectStarted { session, .. }
        | RepoDetailAction::RejectFinished { session, .. } => {
            log::debug!(
                "Dropping result for detail session {}, current is {}",
                session,
                state.session
            );
        }
        RepoDetailAction::RequestMerge | RepoDetailAction::OpenInBrowser => {}
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pr_triage::RepositoryDetail;
    use crate::test_support::{pull_request, repository};
    use pretty_assertions::assert_eq;

    const LIFETIME: Duration = Duration::from_secs(5);

    fn reduce(state: RepoDetailState, action: RepoDetailAction) -> RepoDetailState {
        reduce_repo_detail(state, &action, LIFETIME)
    }

    fn loaded(numbers: &[u64]) -> RepoDetailState {
        let state = reduce(
            RepoDetailState::default(),
            RepoDetailAction::Open {
                session: 1,
                full_name: "a/b".to_string(),
                html_url: "https://github.com/a/b".to_string(),
            },
        );
        reduce(
            state,
            RepoDetailAction::Loaded {
                session: 1,
                detail: RepositoryDetail {
                    repository: repository("a/b"),
                    pull_requests: numbers
                        .iter()
                        .map(|n| pull_request(*n, Some("a/b"), "feature"))
                        .collect(),
                },
            },
        )
    }

    fn numbers(state: &RepoDetailState) -> Vec<u64> {
        state.pull_requests.iter().map(|pr| pr.number).collect()
    }

    #[test]
    fn test_merge_success_then_failure() {
        let mut state = loaded(&[7, 9]);
        state = reduce(state, RepoDetailAction::SelectNext);
        state = reduce(state, RepoDetailAction::RequestMerge);
        assert!(state.merge_prompt);
        state = reduce(state, RepoDetailAction::ConfirmMerge);
        state = reduce(state, RepoDetailAction::MergeStarted { session: 1, number: 7 });
        assert!(state.is_busy());

        state = reduce(
            state,
            RepoDetailAction::MergeFinished {
                session: 1,
                number: 7,
                result: Ok(()),
            },
        );
        assert_eq!(numbers(&state), vec![9]);
        assert!(state.selected.is_none());
        assert_eq!(state.notice.as_ref().unwrap().message, "PR #7 merged successfully!");

        state = reduce(state, RepoDetailAction::SelectNext);
        state = reduce(state, RepoDetailAction::MergeStarted { session: 1, number: 9 });
        state = reduce(
            state,
            RepoDetailAction::MergeFinished {
                session: 1,
                number: 9,
                result: Err(ClientError::RemoteAction {
                    message: "Pull Request is not mergeable".to_string(),
                }),
            },
        );
        assert_eq!(numbers(&state), vec![9]);
        assert_eq!(state.selected_pull_request().unwrap().number, 9);
        let notice = state.notice.as_ref().unwrap();
        assert_eq!(notice.kind, StatusKind::Error);
        assert_eq!(notice.message, "Pull Request is not mergeable");
        assert!(!state.is_busy());
    }

    #[test]
    fn test_single_reject_only_arms() {
        let mut state = loaded(&[7]);
        state = reduce(state, RepoDetailAction::SelectNext);
        state = reduce(state, RepoDetailAction::Reject);
        assert!(state.reject_armed);
        assert!(state.in_flight.is_none());
        assert_eq!(numbers(&state), vec![7]);
    }

    #[test]
    fn test_reject_success_mentions_branch() {
        let mut state = loaded(&[7]);
        state = reduce(state, RepoDetailAction::SelectNext);
        state = reduce(state, RepoDetailAction::Reject);
        state = reduce(state, RepoDetailAction::RejectStarted { session: 1, number: 7 });
        assert!(!state.reject_armed);

        state = reduce(
            state,
            RepoDetailAction::RejectFinished {
                session: 1,
                number: 7,
                result: Ok(true),
            },
        );
        assert!(state.pull_requests.is_empty());
        assert_eq!(
            state.notice.as_ref().unwrap().message,
            "PR #7 closed successfully. Branch deleted."
        );
    }

    #[test]
    fn test_failure_without_reason_uses_fallback() {
        let mut state = loaded(&[7]);
        state = reduce(state, RepoDetailAction::SelectNext);
        state = reduce(
            state,
            RepoDetailAction::RejectFinished {
                session: 1,
                number: 7,
                result: Err(ClientError::RemoteAction {
                    message: String::new(),
                }),
            },
        );
        assert_eq!(state.notice.as_ref().unwrap().message, REJECT_FAILED);
        assert_eq!(numbers(&state), vec![7]);
    }

    #[test]
    fn test_results_for_closed_view_are_dropped() {
        let state = loaded(&[7]);
        let state = reduce(
            state,
            RepoDetailAction::Open {
                session: 2,
                full_name: "c/d".to_string(),
                html_url: "https://github.com/c/d".to_string(),
            },
        );
        let state = reduce(
            state,
            RepoDetailAction::Loaded {
                session: 1,
                detail: RepositoryDetail {
                    repository: repository("a/b"),
                    pull_requests: vec![pull_request(7, None, "x")],
                },
            },
        );
        assert_eq!(state.load, DetailLoad::Loading);
        assert!(state.pull_requests.is_empty());
        assert_eq!(state.full_name, "c/d");
    }

    #[test]
    fn test_merge_prompt_needs_selection() {
        let state = reduce(loaded(&[7]), RepoDetailAction::RequestMerge);
        assert!(!state.merge_prompt);
    }
}
