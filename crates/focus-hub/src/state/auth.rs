//! Sign-in Screen State

/// Token entry and the outcome of the last sign-in attempt
#[derive(Clone, Default)]
pub struct AuthState {
    /// Typed token; never logged or rendered in clear
    pub token_input: String,
    /// A sign-in or verification request is in flight
    pub submitting: bool,
    pub error: Option<String>,
    /// Set when the stored token could not be checked at startup
    pub verification_failed: Option<String>,
}

impl AuthState {
    /// Typing is disabled while a request runs or a retry is offered
    pub fn accepts_input(&self) -> bool {
        !self.submitting && self.verification_failed.is_none()
    }

    pub fn masked_input(&self) -> String {
        "•".repeat(self.token_input.chars().count())
    }
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field(
                "token_input",
                &format_args!("<{} chars>", self.token_input.chars().count()),
            )
            .field("submitting", &self.submitting)
            .field("error", &self.error)
            .field("verification_failed", &self.verification_failed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[test]
    fn test_debug_redacts_token() {
        let auth = AuthState {
            token_input: "ghp_secret".to_string(),
            ..Default::default()
        };
        let rendered = format!("{:?}", auth);
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("<10 chars>"));

        let mut state = AppState::default();
        state.auth = auth;
        assert!(!format!("{:?}", state).contains("ghp_secret"));
    }
}
