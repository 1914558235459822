//! Reducers
//!
//! Pure functions from state + action to new state. The root reducer in
//! `app_reducer` dispatches to one sub-reducer per screen.

pub mod add_repo_reducer;
pub mod app_reducer;
pub mod auth_reducer;
pub mod dashboard_reducer;
pub mod repo_detail_reducer;
pub mod splash_reducer;
pub mod status_bar_reducer;

pub use app_reducer::reduce;
