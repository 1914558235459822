//! Status Bar View Model
//!
//! Pre-computes presentation data for the status bar. A live notice of the
//! detail view wins over the outcome feed.

use crate::state::{AppState, StatusKind};
use crate::views::ViewId;
use focus_hub_theme::Theme;
use ratatui::style::{Color, Modifier, Style};

/// View model for rendering the status bar
#[derive(Debug, Clone)]
pub struct StatusBarViewModel {
    pub emoji: &'static str,
    pub message: String,
    /// Formatted for display (e.g., "14:32:05"); empty for notices
    pub timestamp: String,
    /// Operation that produced the message
    pub source: String,
    pub message_style: Style,
    pub bg_color: Color,
    /// Style for timestamp and source
    pub metadata_style: Style,
}

fn kind_color(kind: StatusKind, theme: &Theme) -> Color {
    match kind {
        StatusKind::Running | StatusKind::Warning => theme.status_warning,
        StatusKind::Success => theme.status_success,
        StatusKind::Error => theme.status_error,
        StatusKind::Info => theme.status_info,
    }
}

impl StatusBarViewModel {
    pub fn from_state(state: &AppState) -> Self {
        let theme = &state.theme;
        let metadata_style = Style::default().fg(theme.text_muted);

        let detail_on_top = state.active_view().view_id() == ViewId::RepoDetail;
        if let Some(notice) = state.repo_detail.notice.as_ref().filter(|_| detail_on_top) {
            return Self {
                emoji: notice.kind.emoji(),
                message: notice.message.clone(),
                timestamp: String::new(),
                source: state.repo_detail.full_name.clone(),
                message_style: Style::default()
                    .fg(kind_color(notice.kind, theme))
                    .add_modifier(Modifier::BOLD),
                bg_color: theme.bg_primary,
                metadata_style,
            };
        }

        match state.status_bar.latest() {
            Some(msg) => Self {
                emoji: msg.kind.emoji(),
                message: msg.message.clone(),
                timestamp: msg.timestamp.format("%H:%M:%S").to_string(),
                source: msg.source.clone(),
                message_style: Style::default()
                    .fg(kind_color(msg.kind, theme))
                    .add_modifier(Modifier::BOLD),
                bg_color: theme.bg_primary,
                metadata_style,
            },
            None => Self {
                emoji: "👋",
                message: "Welcome to FocusHub".to_string(),
                timestamp: String::new(),
                source: String::new(),
                message_style: Style::default()
                    .fg(theme.text_muted)
                    .add_modifier(Modifier::ITALIC),
                bg_color: theme.bg_primary,
                metadata_style,
            },
        }
    }
}
