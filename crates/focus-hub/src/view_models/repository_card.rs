//! Dashboard card view model

use crate::domain_models::RepositorySummary;
use focus_hub_theme::Theme;
use ratatui::style::Style;

const NO_DESCRIPTION: &str = "No description provided.";

#[derive(Debug, Clone)]
pub struct RepositoryCardViewModel {
    pub title: String,
    pub owner: String,
    pub description: String,
    /// (icon, value, style): stars, forks, issues, open PRs
    pub metrics: Vec<(&'static str, String, Style)>,
    /// Right-aligned badge: "loading…", "error" or empty
    pub badge: String,
    pub border_style: Style,
    pub description_style: Style,
}

impl RepositoryCardViewModel {
    pub fn from_summary(summary: &RepositorySummary, selected: bool, theme: &Theme) -> Self {
        let border_style = if summary.error {
            theme.error()
        } else if selected {
            theme.panel_border()
        } else {
            theme.panel_border_inactive()
        };

        let badge = if summary.loading {
            "loading…"
        } else if summary.error {
            "error"
        } else {
            ""
        };

        Self {
            title: summary.full_name.clone(),
            owner: summary.owner.login.clone(),
            description: summary
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            metrics: vec![
                ("★", summary.stargazers_count.to_string(), Style::default().fg(theme.metric_stars)),
                ("⑂", summary.forks_count.to_string(), Style::default().fg(theme.metric_forks)),
                ("◎", summary.open_issues_count.to_string(), Style::default().fg(theme.metric_issues)),
                ("⇄", summary.pull_requests_count.to_string(), Style::default().fg(theme.metric_pulls)),
            ],
            badge: badge.to_string(),
            border_style,
            description_style: if summary.error { theme.error() } else { theme.text_secondary() },
        }
    }
}
