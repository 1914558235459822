//! Session actions

use crate::session_manager::SessionSnapshot;

#[derive(Debug, Clone)]
pub enum SessionAction {
    /// The session manager changed; replaces the read-only copy in state
    SnapshotUpdated(SessionSnapshot),
    /// Sign out and forget the stored token
    Logout,
}
