//! Dashboard Reducer

use crate::actions::DashboardAction;
use crate::repository_sync::apply_refresh;
use crate::state::DashboardState;

pub fn reduce_dashboard(mut state: DashboardState, action: &DashboardAction) -> DashboardState {
    match action {
        DashboardAction::SelectNext => state.select_next(),
        DashboardAction::SelectPrevious => state.select_previous(),

        DashboardAction::StartFilter => {
            state.filter_active = true;
        }
        DashboardAction::FilterChar(c) => {
            state.filter.push(*c);
            state.selected = 0;
        }
        DashboardAction::FilterBackspace => {
            state.filter.pop();
            state.clamp_selection();
        }
        DashboardAction::FilterClear => {
            state.filter.clear();
            state.clamp_selection();
        }
        DashboardAction::ApplyFilter => {
            state.filter_active = false;
        }
        DashboardAction::CancelFilter => {
            state.filter_active = false;
            state.filter.clear();
            state.clamp_selection();
        }

        DashboardAction::LoadStarted {
            generation,
            watchlist,
        } => {
            state.start_loading(*generation, watchlist);
        }
        DashboardAction::Loaded {
            generation,
            summaries,
        } => {
            if *generation != state.generation {
                log::debug!(
                    "Dropping repositories of load {}, latest is {}",
                    generation,
                    state.generation
                );
                return state;
            }
            state.summaries = summaries.clone();
            state.loading = false;
            state.clamp_selection();
        }

        DashboardAction::RefreshStarted { full_name } => {
            if let Some(card) = state.summaries.iter_mut().find(|s| &s.full_name == full_name) {
                card.loading = true;
            }
        }
        DashboardAction::RefreshFinished { full_name, result } => {
            apply_refresh(&mut state.summaries, full_name, result.clone());
        }

        // Handled by middleware
        DashboardAction::ReloadAll
        | DashboardAction::RefreshSelected
        | DashboardAction::OpenDetail
        | DashboardAction::RemoveSelected
        | DashboardAction::OpenInBrowser => {}
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_models::RepositorySummary;
    use crate::test_support::{not_found, repository};
    use pretty_assertions::assert_eq;

    fn watchlist(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn loaded(names: &[&str]) -> DashboardState {
        let state = reduce_dashboard(
            DashboardState::default(),
            &DashboardAction::LoadStarted {
                generation: 1,
                watchlist: watchlist(names),
            },
        );
        reduce_dashboard(
            state,
            &DashboardAction::Loaded {
                generation: 1,
                summaries: names
                    .iter()
                    .map(|n| RepositorySummary::from_repository(repository(n), 2))
                    .collect(),
            },
        )
    }

    #[test]
    fn test_stale_load_is_dropped() {
        let state = loaded(&["a/b"]);
        let state = reduce_dashboard(
            state,
            &DashboardAction::LoadStarted {
                generation: 2,
                watchlist: watchlist(&["a/b", "c/d"]),
            },
        );
        let state = reduce_dashboard(
            state,
            &DashboardAction::Loaded {
                generation: 1,
                summaries: vec![],
            },
        );

        assert!(state.loading);
        assert_eq!(state.summaries.len(), 2);
    }

    #[test]
    fn test_reload_keeps_previous_data_visible() {
        let state = loaded(&["a/b"]);
        let state = reduce_dashboard(
            state,
            &DashboardAction::LoadStarted {
                generation: 2,
                watchlist: watchlist(&["a/b"]),
            },
        );
        assert!(state.summaries[0].loading);
        assert_eq!(state.summaries[0].stargazers_count, 12);
    }

    #[test]
    fn test_refresh_failure_flags_only_its_card() {
        let state = loaded(&["a/b", "c/d"]);
        let state = reduce_dashboard(
            state,
            &DashboardAction::RefreshStarted {
                full_name: "c/d".to_string(),
            },
        );
        assert!(state.summaries[1].loading);

        let state = reduce_dashboard(
            state,
            &DashboardAction::RefreshFinished {
                full_name: "c/d".to_string(),
                result: Err(not_found()),
            },
        );
        assert!(!state.summaries[0].error);
        assert!(state.summaries[1].error);
        assert!(!state.summaries[1].loading);
        assert_eq!(state.summaries[1].pull_requests_count, 2);
    }

    #[test]
    fn test_cancel_filter_restores_all_cards() {
        let state = loaded(&["a/b", "c/d"]);
        let state = reduce_dashboard(state, &DashboardAction::StartFilter);
        let state = reduce_dashboard(state, &DashboardAction::FilterChar('c'));
        assert_eq!(state.visible().len(), 1);

        let state = reduce_dashboard(state, &DashboardAction::CancelFilter);
        assert!(!state.filter_active);
        assert_eq!(state.visible().len(), 2);
    }
}
