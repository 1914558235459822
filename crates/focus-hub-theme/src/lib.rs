//! FocusHub colour palette and prebuilt styles

use ratatui::{prelude::*, style::palette::tailwind};

/// Application theme - centralized color and style management
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_panel: Color,

    // Text colors
    pub text_primary: Color,
    pub text_subtle: Color,
    pub text_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Status colors
    pub status_success: Color,
    pub status_error: Color,
    pub status_warning: Color,
    pub status_info: Color,

    // Repository card metrics
    pub metric_stars: Color,
    pub metric_forks: Color,
    pub metric_issues: Color,
    pub metric_pulls: Color,

    // Selection colors
    pub selected_bg: Color,
    pub selected_fg: Color,
    /// Foreground for text typed into a focused input
    pub active_fg: Color,

    // Danger zone (reject)
    pub danger_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg_primary: tailwind::SLATE.c950,
            bg_secondary: tailwind::SLATE.c900,
            bg_panel: tailwind::SLATE.c800,

            text_primary: tailwind::SLATE.c100,
            text_subtle: tailwind::SLATE.c300,
            text_muted: tailwind::SLATE.c400,

            accent_primary: tailwind::CYAN.c400,
            accent_secondary: tailwind::CYAN.c600,

            status_success: tailwind::GREEN.c400,
            status_error: tailwind::RED.c400,
            status_warning: tailwind::YELLOW.c400,
            status_info: tailwind::BLUE.c400,

            metric_stars: tailwind::AMBER.c400,
            metric_forks: tailwind::SKY.c400,
            metric_issues: tailwind::ORANGE.c400,
            metric_pulls: tailwind::PURPLE.c400,

            selected_bg: tailwind::BLUE.c400,
            selected_fg: Color::White,
            active_fg: Color::White,

            danger_bg: tailwind::RED.c700,
        }
    }

    // Prebuilt styles for common use cases

    /// Style for panel backgrounds (popups, splash)
    pub fn panel_background(&self) -> Style {
        Style::default().bg(self.bg_panel)
    }

    /// Style for panel borders
    pub fn panel_border(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders of panels that do not have focus
    pub fn panel_border_inactive(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Style for panel titles
    pub fn panel_title(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key hints (e.g., "Enter" in "Enter open")
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key descriptions
    pub fn key_description(&self) -> Style {
        Style::default().fg(self.text_subtle)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent_primary)
    }

    pub fn selection_bg(&self) -> Color {
        self.accent_secondary
    }

    /// Style for selected list rows and cards
    pub fn table_selected(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the armed reject prompt
    pub fn danger(&self) -> Style {
        Style::default()
            .fg(Color::White)
            .bg(self.danger_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.status_error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default()
            .fg(self.status_success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default()
            .fg(self.status_warning)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for muted/helper text
    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Style for primary text
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Style for secondary text (descriptions, instructions)
    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.text_subtle)
    }
}
