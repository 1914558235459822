//! Application State

use focus_hub_config::AppConfig;
use focus_hub_theme::Theme;

use crate::keymap::{default_keymap, Keymap};
use crate::session_manager::SessionSnapshot;
use crate::views::{SplashView, View};

use super::{
    AddRepoFormState, AuthState, DashboardState, RepoDetailState, SplashState, StatusBarState,
};

/// Application state
pub struct AppState {
    pub running: bool,
    /// Stack of views - bottom view is the base, top views are floating overlays
    /// Views are rendered bottom-up, so the last view in the stack renders on top
    pub view_stack: Vec<Box<dyn View>>,
    pub splash: SplashState,
    /// Read-only copy of the session manager, replaced on every change
    pub session: SessionSnapshot,
    pub auth: AuthState,
    pub dashboard: DashboardState,
    pub add_repo_form: AddRepoFormState,
    pub repo_detail: RepoDetailState,
    pub status_bar: StatusBarState,
    pub theme: Theme,
    pub keymap: Keymap,
    pub app_config: AppConfig,
}

impl AppState {
    pub fn new(app_config: AppConfig) -> Self {
        Self {
            running: true,
            view_stack: vec![Box::new(SplashView::new())],
            splash: SplashState::default(),
            session: SessionSnapshot::default(),
            auth: AuthState::default(),
            dashboard: DashboardState::default(),
            add_repo_form: AddRepoFormState::default(),
            repo_detail: RepoDetailState::default(),
            status_bar: StatusBarState::default(),
            theme: Theme::default(),
            keymap: default_keymap(),
            app_config,
        }
    }

    /// Get the top-most (active) view from the stack
    pub fn active_view(&self) -> &dyn View {
        self.view_stack
            .last()
            .expect("View stack should never be empty")
            .as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("running", &self.running)
            .field("view_stack", &format!("{} views", self.view_stack.len()))
            .field("splash", &self.splash)
            .field("session", &self.session)
            .field("auth", &self.auth)
            .field("dashboard", &self.dashboard)
            .field("add_repo_form", &self.add_repo_form)
            .field("repo_detail", &self.repo_detail)
            .field("status_bar", &self.status_bar)
            .field("theme", &"<theme>")
            .field("app_config", &self.app_config)
            .finish()
    }
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            running: self.running,
            view_stack: self.view_stack.clone(),
            splash: self.splash.clone(),
            session: self.session.clone(),
            auth: self.auth.clone(),
            dashboard: self.dashboard.clone(),
            add_repo_form: self.add_repo_form.clone(),
            repo_detail: self.repo_detail.clone(),
            status_bar: self.status_bar.clone(),
            theme: self.theme.clone(),
            keymap: self.keymap.clone(),
            app_config: self.app_config.clone(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
