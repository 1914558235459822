//! Sign-in screen actions

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    // Text input (translated from TextInputAction)
    Char(char),
    Backspace,
    Clear,

    /// Sign in with the typed token (Enter)
    Submit,
    /// A sign-in request is in flight
    LoginStarted,
    LoginSucceeded,
    LoginFailed { message: String },

    /// The stored token could not be checked; offer retry or sign-out
    VerificationFailed { message: String },
    /// Check the stored token again
    RetryVerification,
    RetryStarted,
}
