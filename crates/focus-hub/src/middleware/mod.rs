use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::state::AppState;

pub mod context_action_middleware;
pub mod keyboard_middleware;
pub mod navigation_middleware;
pub mod pull_request_middleware;
pub mod repository_sync_middleware;
pub mod session_middleware;
pub mod text_input_middleware;

pub use context_action_middleware::ContextActionMiddleware;
pub use keyboard_middleware::KeyboardMiddleware;
pub use navigation_middleware::NavigationMiddleware;
pub use pull_request_middleware::PullRequestMiddleware;
pub use repository_sync_middleware::RepositorySyncMiddleware;
pub use session_middleware::SessionMiddleware;
pub use text_input_middleware::TextInputMiddleware;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Middleware runs on the background thread, so it can perform blocking operations
/// (API calls, file I/O) without affecting the UI render loop.
pub trait Middleware: Send {
    /// Handle an action
    ///
    /// - `action`: The action to process
    /// - `state`: Current application state (read-only snapshot)
    /// - `dispatcher`: Use to dispatch actions that should re-enter middleware chain
    ///
    /// Returns `true` to continue chain, `false` to consume action
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool;
}
