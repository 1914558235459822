//! Single-line input field shared by the sign-in and add forms

use focus_hub_theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const LABEL_WIDTH: usize = 12;

/// Render `label: value▌`, or the placeholder when `value` is empty
pub fn render_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
    placeholder: Option<&str>,
) {
    let label_style = if focused {
        theme.text().add_modifier(Modifier::BOLD)
    } else {
        theme.text()
    };
    let cursor = if focused {
        Span::styled("▌", theme.accent())
    } else {
        Span::raw("")
    };

    let mut spans = vec![
        Span::styled(if focused { "> " } else { "  " }, theme.accent().bold()),
        Span::styled(
            format!("{:width$}", format!("{}:", label), width = LABEL_WIDTH),
            label_style,
        ),
    ];

    match placeholder.filter(|_| value.is_empty()) {
        Some(placeholder) => {
            spans.push(cursor);
            spans.push(Span::styled(
                placeholder.to_string(),
                theme.muted().italic().add_modifier(Modifier::DIM),
            ));
        }
        None => {
            let value_style = if focused {
                Style::default()
                    .fg(theme.active_fg)
                    .bg(theme.selection_bg())
            } else {
                theme.text()
            };
            spans.push(Span::styled(value.to_string(), value_style));
            spans.push(cursor);
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
