use crate::actions::{Action, ContextAction, NavigationAction, TextInputAction};
use crate::capabilities::PanelCapabilities;
use crate::command_id::CommandId;
use crate::state::AppState;
use ratatui::{
    layout::Rect,
    style::Stylize,
    text::{Line, Span},
    Frame,
};

pub mod add_repository_view;
pub mod auth_view;
pub mod dashboard_view;
mod input_field;
pub mod repo_detail_view;
pub mod splash_view;
pub mod status_bar;

pub use add_repository_view::AddRepositoryView;
pub use auth_view::AuthView;
pub use dashboard_view::DashboardView;
pub use repo_detail_view::RepoDetailView;
pub use splash_view::SplashView;

/// View identifier - allows comparing which view is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewId {
    Splash,
    Auth,
    Dashboard,
    AddRepository,
    RepoDetail,
}

/// View trait - defines the interface that all views must implement
///
/// Views travel inside actions between threads, so the trait must stay
/// object-safe and `Send`.
pub trait View: std::fmt::Debug + Send + Sync {
    fn view_id(&self) -> ViewId;

    fn render(&self, state: &AppState, area: Rect, f: &mut Frame);

    /// What kind of keyboard input this view takes right now
    fn capabilities(&self, state: &AppState) -> PanelCapabilities;

    /// Clone this view into a Box (Clone requires Sized)
    fn clone_box(&self) -> Box<dyn View>;

    /// Translate a generic navigation action to this view's specific action
    fn translate_navigation(&self, _nav: NavigationAction) -> Option<Action> {
        None
    }

    /// Translate a generic text input action to this view's specific action
    fn translate_text_input(&self, _input: TextInputAction) -> Option<Action> {
        None
    }

    /// Translate a context-dependent action (Enter) to this view's action
    fn translate_context_action(&self, _action: ContextAction, _state: &AppState) -> Option<Action> {
        None
    }

    /// Whether a keybinding producing `action` applies to this view
    fn accepts_action(&self, action: &Action) -> bool;
}

impl Clone for Box<dyn View> {
    fn clone(&self) -> Box<dyn View> {
        self.clone_box()
    }
}

/// Render the entire application UI
///
/// Views render bottom-up; floating views dim and clear what lies beneath.
pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    for view in &state.view_stack {
        view.render(state, area, f);
    }
}

/// `key title` pairs for the bottom border, taken from the keymap
pub(crate) fn footer_hints(state: &AppState, commands: &[CommandId]) -> Line<'static> {
    let theme = &state.theme;
    let mut spans = vec![Span::raw(" ")];
    for command in commands {
        if let Some(hint) = state.keymap.compact_hint_for_command(*command) {
            spans.push(Span::styled(hint, theme.key_hint().bold()));
            spans.push(Span::styled(format!(" {}  ", command.title()), theme.muted()));
        }
    }
    Line::from(spans)
}
