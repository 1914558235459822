//! Dashboard screen actions

use crate::domain_models::RepositorySummary;
use gh_client::ClientError;

#[derive(Debug, Clone)]
pub enum DashboardAction {
    // Navigation (translated from NavigationAction)
    SelectNext,
    SelectPrevious,

    // Filter over owner/name
    StartFilter,
    FilterChar(char),
    FilterBackspace,
    FilterClear,
    /// Leave filter input, keep the filter
    ApplyFilter,
    /// Leave filter input and drop the filter
    CancelFilter,

    // Batch load of every card
    ReloadAll,
    LoadStarted {
        generation: u64,
        watchlist: Vec<String>,
    },
    Loaded {
        generation: u64,
        summaries: Vec<RepositorySummary>,
    },

    // Single card refresh
    RefreshSelected,
    RefreshStarted {
        full_name: String,
    },
    RefreshFinished {
        full_name: String,
        result: Result<RepositorySummary, ClientError>,
    },

    /// Open the detail view of the selected card (Enter)
    OpenDetail,
    /// Drop the selected card from the watchlist
    RemoveSelected,
    /// Open the selected repository on the web
    OpenInBrowser,
}
