//! Status Bar State

use chrono::{DateTime, Local};
use std::collections::VecDeque;

const MAX_HISTORY: usize = 100;

/// Kind of status message (determines icon and color)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Running,
    Success,
    Error,
    Warning,
    Info,
}

impl StatusKind {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Running => "⏳",
            Self::Success => "✅",
            Self::Error => "🚨",
            Self::Warning => "⚠️",
            Self::Info => "ℹ️",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub timestamp: DateTime<Local>,
    pub kind: StatusKind,
    pub message: String,
    /// The operation that produced the message, e.g. "Merge"
    pub source: String,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, message: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            kind,
            message: message.into(),
            source: source.into(),
        }
    }
}

/// Outcome feed of every operation, newest at the back
#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    pub messages: VecDeque<StatusMessage>,
}

impl StatusBarState {
    pub fn latest(&self) -> Option<&StatusMessage> {
        self.messages.back()
    }

    /// Push a message, dropping the oldest past the history limit
    pub fn push(&mut self, message: StatusMessage) {
        self.messages.push_back(message);
        if self.messages.len() > MAX_HISTORY {
            self.messages.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
