//! Actions module
//!
//! Tagged action architecture:
//! - Generic actions (Navigation, TextInput, ViewContext) that the active view
//!   translates into screen-specific actions
//! - Global actions that affect the entire application
//! - Screen-specific actions that are already targeted to a screen

// Shared action types
pub mod context_action;
pub mod event;
pub mod global;
pub mod navigation;
pub mod text_input;

// Screen-specific action types
pub mod add_repository;
pub mod auth;
pub mod bootstrap;
pub mod dashboard;
pub mod repo_detail;
pub mod session;
pub mod status_bar;

pub use add_repository::AddRepositoryAction;
pub use auth::AuthAction;
pub use bootstrap::BootstrapAction;
pub use context_action::ContextAction;
pub use dashboard::DashboardAction;
pub use event::Event;
pub use global::GlobalAction;
pub use navigation::NavigationAction;
pub use repo_detail::RepoDetailAction;
pub use session::SessionAction;
pub use status_bar::StatusBarAction;
pub use text_input::TextInputAction;

/// Root action enum - tagged by screen/domain
#[derive(Debug, Clone)]
pub enum Action {
    /// Facts that re-enter the middleware chain; use `Action::event`
    Event(Event),

    // Generic actions (need translation by active view)
    Navigate(NavigationAction),
    TextInput(TextInputAction),
    ViewContext(ContextAction),

    Global(GlobalAction),

    // Screen-specific actions (already targeted)
    Bootstrap(BootstrapAction),
    Session(SessionAction),
    Auth(AuthAction),
    Dashboard(DashboardAction),
    AddRepository(AddRepositoryAction),
    RepoDetail(RepoDetailAction),
    StatusBar(StatusBarAction),
}

impl Action {
    /// Factory for events, so re-entry is visible at the call site
    pub fn event(event: Event) -> Action {
        Action::Event(event)
    }
}
