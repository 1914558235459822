//! Application State Module
//!
//! Contains all state types used by the application, organized by feature.

mod add_repo;
mod app;
mod auth;
mod dashboard;
mod repo_detail;
mod splash;
mod status_bar;

pub use add_repo::{normalize_repository_input, AddRepoFormState, AddRepoStatus};
pub use app::AppState;
pub use auth::AuthState;
pub use dashboard::DashboardState;
pub use repo_detail::{DetailLoad, Notice, RepoDetailState, TriageDecision, TriageOperation};
pub use splash::SplashState;
pub use status_bar::{StatusBarState, StatusKind, StatusMessage};
