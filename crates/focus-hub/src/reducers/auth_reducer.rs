//! Sign-in Screen Reducer

use crate::actions::AuthAction;
use crate::state::AuthState;

pub fn reduce_auth(mut state: AuthState, action: &AuthAction) -> AuthState {
    match action {
        AuthAction::Char(c) if state.accepts_input() => {
            state.token_input.push(*c);
            state.error = None;
        }
        AuthAction::Backspace if state.accepts_input() => {
            state.token_input.pop();
        }
        AuthAction::Clear if state.accepts_input() => {
            state.token_input.clear();
        }
        AuthAction::LoginStarted | AuthAction::RetryStarted => {
            state.submitting = true;
            state.error = None;
        }
        AuthAction::LoginSucceeded => {
            state = AuthState::default();
        }
        AuthAction::LoginFailed { message } => {
            state.submitting = false;
            state.verification_failed = None;
            state.error = Some(message.clone());
        }
        AuthAction::VerificationFailed { message } => {
            state.submitting = false;
            state.verification_failed = Some(message.clone());
        }
        _ => {}
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typed(token: &str) -> AuthState {
        token
            .chars()
            .fold(AuthState::default(), |s, c| reduce_auth(s, &AuthAction::Char(c)))
    }

    #[test]
    fn test_typing_is_masked() {
        let state = typed("ghp_1");
        assert_eq!(state.token_input, "ghp_1");
        assert_eq!(state.masked_input(), "•••••");
    }

    #[test]
    fn test_input_ignored_while_submitting() {
        let state = reduce_auth(typed("abc"), &AuthAction::LoginStarted);
        let state = reduce_auth(state, &AuthAction::Char('d'));
        let state = reduce_auth(state, &AuthAction::Backspace);
        assert_eq!(state.token_input, "abc");
    }

    #[test]
    fn test_failure_keeps_input_and_shows_error() {
        let state = reduce_auth(typed("abc"), &AuthAction::LoginStarted);
        let state = reduce_auth(
            state,
            &AuthAction::LoginFailed {
                message: "Bad credentials".to_string(),
            },
        );
        assert!(!state.submitting);
        assert_eq!(state.error.as_deref(), Some("Bad credentials"));
        assert_eq!(state.token_input, "abc");

        let state = reduce_auth(state, &AuthAction::Char('d'));
        assert!(state.error.is_none());
    }

    #[test]
    fn test_success_clears_token() {
        let state = reduce_auth(typed("abc"), &AuthAction::LoginSucceeded);
        assert!(state.token_input.is_empty());
    }

    #[test]
    fn test_verification_failure_disables_typing() {
        let state = reduce_auth(
            AuthState::default(),
            &AuthAction::VerificationFailed {
                message: "Network error: timed out".to_string(),
            },
        );
        assert!(!state.accepts_input());
        let state = reduce_auth(state, &AuthAction::Char('a'));
        assert!(state.token_input.is_empty());
    }
}
