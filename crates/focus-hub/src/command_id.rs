//! Command identifiers
//!
//! Commands are the semantic actions users can trigger from the keyboard.
//! Keybindings refer to them by ID; the active view decides whether the
//! resulting action applies.

/// Unique identifier for each command in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    // === Navigation ===
    NavigateNext,
    NavigatePrevious,
    /// Context-dependent confirm (Enter)
    Confirm,

    // === Watchlist ===
    RepositoryAdd,
    RepositoryRemove,
    RepositoryRefresh,
    RepositoryReloadAll,
    RepositoryOpenInBrowser,
    FilterStart,

    // === Pull request triage ===
    PrMerge,
    PrReject,
    PrOpenInBrowser,
    ConfirmYes,
    ConfirmNo,

    // === Session ===
    AuthRetry,
    SessionLogout,

    // === General ===
    GlobalClose,
    GlobalQuit,
}

impl CommandId {
    /// Convert this command ID to an Action
    pub fn to_action(self) -> crate::actions::Action {
        use crate::actions::{
            Action, AuthAction, ContextAction, DashboardAction, GlobalAction, NavigationAction,
            RepoDetailAction, SessionAction,
        };
        use crate::views::AddRepositoryView;

        match self {
            Self::NavigateNext => Action::Navigate(NavigationAction::Next),
            Self::NavigatePrevious => Action::Navigate(NavigationAction::Previous),
            Self::Confirm => Action::ViewContext(ContextAction::Confirm),

            Self::RepositoryAdd => {
                Action::Global(GlobalAction::PushView(Box::new(AddRepositoryView::new())))
            }
            Self::RepositoryRemove => Action::Dashboard(DashboardAction::RemoveSelected),
            Self::RepositoryRefresh => Action::Dashboard(DashboardAction::RefreshSelected),
            Self::RepositoryReloadAll => Action::Dashboard(DashboardAction::ReloadAll),
            Self::RepositoryOpenInBrowser => Action::Dashboard(DashboardAction::OpenInBrowser),
            Self::FilterStart => Action::Dashboard(DashboardAction::StartFilter),

            Self::PrMerge => Action::RepoDetail(RepoDetailAction::RequestMerge),
            Self::PrReject => Action::RepoDetail(RepoDetailAction::Reject),
            Self::PrOpenInBrowser => Action::RepoDetail(RepoDetailAction::OpenInBrowser),
            Self::ConfirmYes => Action::RepoDetail(RepoDetailAction::ConfirmMerge),
            Self::ConfirmNo => Action::RepoDetail(RepoDetailAction::CancelMerge),

            Self::AuthRetry => Action::Auth(AuthAction::RetryVerification),
            Self::SessionLogout => Action::Session(SessionAction::Logout),

            Self::GlobalClose => Action::Global(GlobalAction::Close),
            Self::GlobalQuit => Action::Global(GlobalAction::Quit),
        }
    }

    /// Short title shown next to key hints
    pub fn title(&self) -> &'static str {
        match self {
            Self::NavigateNext => "down",
            Self::NavigatePrevious => "up",
            Self::Confirm => "open",
            Self::RepositoryAdd => "add",
            Self::RepositoryRemove => "remove",
            Self::RepositoryRefresh => "refresh",
            Self::RepositoryReloadAll => "reload all",
            Self::RepositoryOpenInBrowser | Self::PrOpenInBrowser => "browser",
            Self::FilterStart => "filter",
            Self::PrMerge => "merge",
            Self::PrReject => "reject",
            Self::ConfirmYes => "yes",
            Self::ConfirmNo => "no",
            Self::AuthRetry => "retry",
            Self::SessionLogout => "sign out",
            Self::GlobalClose => "close",
            Self::GlobalQuit => "quit",
        }
    }
}
