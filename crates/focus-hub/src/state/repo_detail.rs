//! Repository detail and pull request triage state

use std::time::{Duration, Instant};

use gh_client::{PullRequest, Repository};

use crate::state::StatusKind;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailLoad {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Remote operation running against the selected pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriageOperation {
    Merge(u64),
    Reject(u64),
}

/// What a press of the reject key should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageDecision {
    Ignore,
    /// First press: ask for a second one
    Arm,
    /// Second press: close this pull request
    Start(PullRequest),
}

/// Transient message inside the detail view
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: StatusKind,
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct RepoDetailState {
    /// Identity of the open detail view; 0 when none is open
    pub session: u64,
    pub full_name: String,
    pub html_url: String,
    pub load: DetailLoad,
    pub repository: Option<Repository>,
    pub pull_requests: Vec<PullRequest>,
    pub selected: Option<usize>,
    pub reject_armed: bool,
    /// Merge confirmation popup is open
    pub merge_prompt: bool,
    pub in_flight: Option<TriageOperation>,
    pub notice: Option<Notice>,
}

impl RepoDetailState {
    pub fn open(session: u64, full_name: String, html_url: String) -> Self {
        Self {
            session,
            full_name,
            html_url,
            load: DetailLoad::Loading,
            ..Default::default()
        }
    }

    pub fn selected_pull_request(&self) -> Option<&PullRequest> {
        self.selected.and_then(|i| self.pull_requests.get(i))
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Selection is frozen while an operation runs or the prompt is open
    fn selection_locked(&self) -> bool {
        self.is_busy() || self.merge_prompt
    }

    pub fn select_next(&mut self) {
        if self.selection_locked() || self.pull_requests.is_empty() {
            return;
        }
        let count = self.pull_requests.len();
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % count,
            None => 0,
        });
        self.reject_armed = false;
    }

    pub fn select_previous(&mut self) {
        if self.selection_locked() || self.pull_requests.is_empty() {
            return;
        }
        let count = self.pull_requests.len();
        self.selected = Some(match self.selected {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        });
        self.reject_armed = false;
    }

    pub fn can_request_merge(&self) -> bool {
        !self.selection_locked() && self.selected_pull_request().is_some()
    }

    pub fn reject_decision(&self) -> TriageDecision {
        if self.selection_locked() {
            return TriageDecision::Ignore;
        }
        match self.selected_pull_request() {
            None => TriageDecision::Ignore,
            Some(_) if !self.reject_armed => TriageDecision::Arm,
            Some(pr) => TriageDecision::Start(pr.clone()),
        }
    }

    /// Drop `number` after a successful merge or close
    pub fn remove_pull_request(&mut self, number: u64) {
        self.pull_requests.retain(|pr| pr.number != number);
        self.selected = None;
        self.reject_armed = false;
    }

    pub fn show_notice(&mut self, kind: StatusKind, message: impl Into<String>, lifetime: Duration) {
        self.notice = Some(Notice {
            kind,
            message: message.into(),
            expires_at: Instant::now() + lifetime,
        });
    }

    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.expires_at <= now) {
            self.notice = None;
        }
    }
}
