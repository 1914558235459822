//! Repository detail screen actions
//!
//! Results of remote calls carry the `session` they were started for; the
//! reducer drops results from a detail view that has since been closed.

use crate::pr_triage::RepositoryDetail;
use gh_client::ClientError;

#[derive(Debug, Clone)]
pub enum RepoDetailAction {
    Open {
        session: u64,
        full_name: String,
        html_url: String,
    },
    Loaded {
        session: u64,
        detail: RepositoryDetail,
    },
    LoadFailed {
        session: u64,
        message: String,
    },

    // Navigation (translated from NavigationAction)
    SelectNext,
    SelectPrevious,

    /// Ask for merge confirmation (m)
    RequestMerge,
    /// Merge confirmed (y / Enter in the prompt)
    ConfirmMerge,
    /// Merge declined (n / Esc in the prompt)
    CancelMerge,
    MergeStarted {
        session: u64,
        number: u64,
    },
    MergeFinished {
        session: u64,
        number: u64,
        result: Result<(), ClientError>,
    },

    /// First press arms, second press closes the pull request (x)
    Reject,
    RejectStarted {
        session: u64,
        number: u64,
    },
    RejectFinished {
        session: u64,
        number: u64,
        /// Whether the head branch was deleted
        result: Result<bool, ClientError>,
    },

    /// Open the selected pull request (or the repository) on the web
    OpenInBrowser,
}
