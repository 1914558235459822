//! Dashboard State

use crate::domain_models::RepositorySummary;

/// Cards for the watchlist plus selection and filter
///
/// `selected` indexes the *visible* (filtered) cards.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub summaries: Vec<RepositorySummary>,
    /// A batch load is in flight
    pub loading: bool,
    /// Identity of the latest batch load; older results are dropped
    pub generation: u64,
    pub selected: usize,
    pub filter: String,
    /// Filter text is being typed
    pub filter_active: bool,
}

impl DashboardState {
    pub fn visible(&self) -> Vec<&RepositorySummary> {
        self.summaries
            .iter()
            .filter(|s| s.matches_filter(&self.filter))
            .collect()
    }

    pub fn selected_summary(&self) -> Option<&RepositorySummary> {
        self.visible().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let count = self.visible().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_previous(&mut self) {
        let count = self.visible().len();
        if count > 0 {
            self.selected = if self.selected == 0 {
                count - 1
            } else {
                self.selected - 1
            };
        }
    }

    /// Keep the selection inside the visible cards
    pub fn clamp_selection(&mut self) {
        let count = self.visible().len();
        self.selected = if count == 0 {
            0
        } else {
            self.selected.min(count - 1)
        };
    }

    /// Cards for a fresh batch load, in watchlist order
    pub fn start_loading(&mut self, generation: u64, watchlist: &[String]) {
        self.generation = generation;
        self.loading = true;
        self.summaries = watchlist
            .iter()
            .enumerate()
            .map(|(position, full_name)| {
                // Keep last known data visible while reloading
                match self.summaries.iter().find(|s| &s.full_name == full_name) {
                    Some(previous) if !previous.error => RepositorySummary {
                        loading: true,
                        ..previous.clone()
                    },
                    _ => RepositorySummary::loading(full_name, position),
                }
            })
            .collect();
        self.clamp_selection();
    }

    /// Signed out: forget every card
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dashboard(names: &[&str]) -> DashboardState {
        DashboardState {
            summaries: names
                .iter()
                .enumerate()
                .map(|(i, n)| RepositorySummary::failed(n, i))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_selection_wraps() {
        let mut state = dashboard(&["a/b", "c/d"]);
        state.select_previous();
        assert_eq!(state.selected, 1);
        state.select_next();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_selection_follows_filter() {
        let mut state = dashboard(&["a/b", "rust-lang/rust", "c/d"]);
        state.filter = "RUST".to_string();
        assert_eq!(state.visible().len(), 1);
        assert_eq!(state.selected_summary().unwrap().full_name, "rust-lang/rust");

        state.filter = "zzz".to_string();
        state.clamp_selection();
        assert!(state.selected_summary().is_none());
        state.select_next();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_start_loading_builds_cards_in_order() {
        let mut state = dashboard(&["x/y"]);
        state.selected = 0;
        state.start_loading(3, &["a/b".to_string(), "c/d".to_string()]);

        assert_eq!(state.generation, 3);
        assert!(state.loading);
        let names: Vec<&str> = state.summaries.iter().map(|s| s.full_name.as_str()).collect();
        assert_eq!(names, vec!["a/b", "c/d"]);
        assert!(state.summaries.iter().all(|s| s.loading));
    }
}
