//! Status Bar Actions

use crate::state::StatusKind;

#[derive(Debug, Clone)]
pub enum StatusBarAction {
    /// Push a new status message
    Push {
        kind: StatusKind,
        message: String,
        source: String,
    },
    /// Clear all status messages
    Clear,
}

impl StatusBarAction {
    pub fn running(message: impl Into<String>, source: impl Into<String>) -> Self {
        Self::push(StatusKind::Running, message, source)
    }

    pub fn success(message: impl Into<String>, source: impl Into<String>) -> Self {
        Self::push(StatusKind::Success, message, source)
    }

    pub fn error(message: impl Into<String>, source: impl Into<String>) -> Self {
        Self::push(StatusKind::Error, message, source)
    }

    pub fn warning(message: impl Into<String>, source: impl Into<String>) -> Self {
        Self::push(StatusKind::Warning, message, source)
    }

    pub fn info(message: impl Into<String>, source: impl Into<String>) -> Self {
        Self::push(StatusKind::Info, message, source)
    }

    fn push(kind: StatusKind, message: impl Into<String>, source: impl Into<String>) -> Self {
        Self::Push {
            kind,
            message: message.into(),
            source: source.into(),
        }
    }
}
