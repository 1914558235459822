//! Context Action Translation Middleware
//!
//! Translates context-dependent actions (Enter) via the active view, which
//! may look at state to decide, e.g. confirm an open merge prompt.

use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::AppState;

pub struct ContextActionMiddleware;

impl ContextActionMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ContextActionMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for ContextActionMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        if let Action::ViewContext(context) = action {
            if let Some(translated) = state
                .view_stack
                .last()
                .and_then(|view| view.translate_context_action(*context, state))
            {
                log::debug!("ContextActionMiddleware: Translating {:?} to {:?}", context, translated);
                dispatcher.dispatch(translated);
            }
            // Untranslated context actions have no meaning for the reducers
            return false;
        }
        true
    }
}
