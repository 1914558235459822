//! Navigation actions - shared across screens
//!
//! Views translate these into their screen-specific actions.

/// Generic list navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Next item (j, down arrow)
    Next,
    /// Previous item (k, up arrow)
    Previous,
}
