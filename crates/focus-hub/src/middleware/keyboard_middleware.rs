//! KeyboardMiddleware - translates keyboard events into context-aware actions
//!
//! ## Layer 1: Priority Keys
//! Ctrl+C and Esc work regardless of context.
//!
//! ## Layer 2: Capabilities
//! Views with TEXT_INPUT receive printable keys as text instead of commands.
//!
//! ## Layer 3: Keymap + Gating
//! Look up keys in the keymap, then check if the active view accepts the action.
//! This prevents actions from "leaking" to reducers when a different view is active.
//!
//! Typed characters are never logged; the sign-in form receives the token this way.

use crate::actions::{Action, GlobalAction, NavigationAction, TextInputAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::AppState;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyboardMiddleware;

impl KeyboardMiddleware {
    pub fn new() -> Self {
        Self
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState, dispatcher: &Dispatcher) -> bool {
        let view = state.view_stack.last();
        let capabilities = view.map(|v| v.capabilities(state)).unwrap_or_default();

        // LAYER 1: Priority keys

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            log::debug!("Layer 1: Ctrl+C - dispatching Quit");
            dispatcher.dispatch(Action::Global(GlobalAction::Quit));
            return false;
        }

        // Text views decide themselves what Esc means (cancel filter, close form)
        if key.code == KeyCode::Esc {
            if capabilities.accepts_text_input() {
                dispatcher.dispatch(Action::TextInput(TextInputAction::Escape));
            } else {
                dispatcher.dispatch(Action::Global(GlobalAction::Close));
            }
            return false;
        }

        // LAYER 2: Capability-based routing

        if capabilities.accepts_text_input() {
            if let Some(action) = text_input_action(key, capabilities.supports_item_navigation()) {
                dispatcher.dispatch(action);
                return false;
            }
        }

        // LAYER 3: Keymap lookup + Gating

        for cmd_id in state.keymap.match_key(&key) {
            let action = cmd_id.to_action();

            match view {
                Some(view) if view.accepts_action(&action) => {
                    log::debug!("Layer 3: Command {:?} accepted by view", cmd_id);
                    dispatcher.dispatch(action);
                    return false;
                }
                Some(view) => {
                    log::debug!(
                        "Layer 3: Command {:?} rejected by view {:?}, trying next",
                        cmd_id,
                        view.view_id()
                    );
                }
                None => {
                    dispatcher.dispatch(action);
                    return false;
                }
            }
        }

        // Unhandled keys are consumed
        false
    }
}

/// What `key` means to a view that takes text
fn text_input_action(key: KeyEvent, item_navigation: bool) -> Option<Action> {
    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let action = match key.code {
        KeyCode::Char('u') if control => Action::TextInput(TextInputAction::ClearLine),
        KeyCode::Char(c) if !control && !alt => Action::TextInput(TextInputAction::Char(c)),
        // Cmd+Backspace on Mac clears the line
        KeyCode::Backspace if key.modifiers.contains(KeyModifiers::SUPER) => {
            Action::TextInput(TextInputAction::ClearLine)
        }
        KeyCode::Backspace => Action::TextInput(TextInputAction::Backspace),
        KeyCode::Enter => Action::TextInput(TextInputAction::Confirm),
        KeyCode::Down if item_navigation => Action::Navigate(NavigationAction::Next),
        KeyCode::Up if item_navigation => Action::Navigate(NavigationAction::Previous),
        _ => return None,
    };
    Some(action)
}

impl Default for KeyboardMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for KeyboardMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        if let Action::Global(GlobalAction::KeyPressed(key)) = action {
            return self.handle_key(*key, state, dispatcher);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{DashboardAction, RepoDetailAction};
    use crate::views::{AuthView, DashboardView, RepoDetailView, View};
    use std::sync::mpsc::{channel, Receiver};

    fn press(view: Box<dyn View>, key: KeyEvent) -> Vec<Action> {
        let mut state = AppState::default();
        state.view_stack = vec![view];
        press_in(&state, key)
    }

    fn press_in(state: &AppState, key: KeyEvent) -> Vec<Action> {
        let (tx, rx): (_, Receiver<Action>) = channel();
        let dispatcher = Dispatcher::new(tx);
        let mut middleware = KeyboardMiddleware::new();
        let consumed = !middleware.handle(
            &Action::Global(GlobalAction::KeyPressed(key)),
            state,
            &dispatcher,
        );
        assert!(consumed);
        drop(dispatcher);
        rx.into_iter().collect()
    }

    fn char_key(c: char) -> KeyEvent {
        let modifiers = if c.is_ascii_uppercase() {
            KeyModifiers::SHIFT
        } else {
            KeyModifiers::NONE
        };
        KeyEvent::new(KeyCode::Char(c), modifiers)
    }

    #[test]
    fn test_sign_in_screen_types_command_keys() {
        let actions = press(Box::new(AuthView::new()), char_key('q'));
        assert!(matches!(
            actions.as_slice(),
            [Action::TextInput(TextInputAction::Char('q'))]
        ));
    }

    #[test]
    fn test_shared_key_goes_to_accepting_view() {
        let actions = press(Box::new(DashboardView::new()), char_key('r'));
        assert!(matches!(
            actions.as_slice(),
            [Action::Dashboard(DashboardAction::RefreshSelected)]
        ));

        let actions = press(Box::new(RepoDetailView::new()), char_key('o'));
        assert!(matches!(
            actions.as_slice(),
            [Action::RepoDetail(RepoDetailAction::OpenInBrowser)]
        ));
    }

    #[test]
    fn test_detail_view_ignores_dashboard_keys() {
        let actions = press(Box::new(RepoDetailView::new()), char_key('a'));
        assert!(actions.is_empty());
    }

    #[test]
    fn test_esc_cancels_filter_before_closing() {
        let mut state = AppState::default();
        state.view_stack = vec![Box::new(DashboardView::new())];
        state.dashboard.filter_active = true;

        let actions = press_in(&state, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(matches!(
            actions.as_slice(),
            [Action::TextInput(TextInputAction::Escape)]
        ));

        state.dashboard.filter_active = false;
        let actions = press_in(&state, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(matches!(actions.as_slice(), [Action::Global(GlobalAction::Close)]));
    }

    #[test]
    fn test_verification_failed_screen_offers_retry() {
        let mut state = AppState::default();
        state.view_stack = vec![Box::new(AuthView::new())];
        state.auth.verification_failed = Some("Network error: timed out".to_string());

        let actions = press_in(&state, char_key('r'));
        assert!(matches!(
            actions.as_slice(),
            [Action::Auth(crate::actions::AuthAction::RetryVerification)]
        ));
    }
}
