//! Add Repository form actions

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddRepositoryAction {
    // Text input (translated from TextInputAction)
    Char(char),
    Backspace,
    ClearField,

    /// Add the typed repository (Enter)
    Confirm,
    /// Existence check started for the normalised name
    Submitted { full_name: String },
    Succeeded { full_name: String },
    Failed { message: String },
}
