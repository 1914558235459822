//! Context-sensitive actions
//!
//! `Confirm` (Enter) means different things per view:
//! - Dashboard: open the repository detail
//! - Merge prompt: merge the selected pull request

/// Semantic actions that views interpret differently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextAction {
    /// Primary action on the focused item (Enter)
    Confirm,
}
