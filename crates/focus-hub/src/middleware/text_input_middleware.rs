//! Text Input Translation Middleware
//!
//! Translates generic TextInput actions into view-specific actions
//! using the active view's translate_text_input method. Translated actions
//! are not logged because they may carry token characters.

use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::AppState;

pub struct TextInputMiddleware;

impl TextInputMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextInputMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for TextInputMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        if let Action::TextInput(input) = action {
            let view = state.view_stack.last();
            if let Some(translated) = view.and_then(|v| v.translate_text_input(input.clone())) {
                dispatcher.dispatch(translated);
                return false;
            }
            log::debug!(
                "TextInput action not handled by active view {:?}",
                view.map(|v| v.view_id())
            );
        }
        true
    }
}
