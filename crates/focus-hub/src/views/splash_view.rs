use crate::actions::{Action, GlobalAction};
use crate::capabilities::PanelCapabilities;
use crate::state::{AppState, SplashState};
use crate::views::{View, ViewId};
use figlet_rs::FIGfont;
use focus_hub_theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

const TITLE: &str = "FocusHub";

/// Splash screen view - shown while the stored session is restored
#[derive(Debug, Clone)]
pub struct SplashView;

impl SplashView {
    pub fn new() -> Self {
        Self
    }
}

impl View for SplashView {
    fn view_id(&self) -> ViewId {
        ViewId::Splash
    }

    fn render(&self, state: &AppState, area: Rect, f: &mut Frame) {
        render_splash(&state.splash, &state.theme, area, f);
    }

    fn capabilities(&self, _state: &AppState) -> PanelCapabilities {
        PanelCapabilities::empty()
    }

    fn clone_box(&self) -> Box<dyn View> {
        Box::new(self.clone())
    }

    fn accepts_action(&self, action: &Action) -> bool {
        matches!(
            action,
            Action::Global(GlobalAction::Close | GlobalAction::Quit)
        )
    }
}

fn render_splash(state: &SplashState, theme: &Theme, area: Rect, f: &mut Frame) {
    f.render_widget(Block::default().style(theme.panel_background()), area);

    let title_lines = generate_figlet_title(theme);
    let title_area = Rect {
        x: area.x,
        y: area.y + 2.min(area.height),
        width: area.width,
        height: (title_lines.len() as u16 + 1).min(area.height.saturating_sub(2)),
    };
    f.render_widget(
        Paragraph::new(title_lines).alignment(Alignment::Center),
        title_area,
    );

    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(8),
            Constraint::Percentage(40),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(14),
            Constraint::Min(0),
        ])
        .split(vertical_chunks[1]);

    let mut lines = generate_snake_animation(state.animation_frame, theme);
    lines.push(Line::from(""));
    lines.push(
        Line::from(Span::styled("Signing in…", theme.text().dim())).alignment(Alignment::Center),
    );

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(theme.panel_background()),
        horizontal_chunks[1],
    );
}

/// The snake chases its tail around a 5x5 grid
fn generate_snake_animation(frame: usize, theme: &Theme) -> Vec<Line<'static>> {
    // Grid positions in reading order (row * 5 + col): perimeter, then inward
    const PATH: [usize; 25] = [
        0, 1, 2, 3, 4, 9, 14, 19, 24, 23, 22, 21, 20, 15, 10, 5, 6, 7, 8, 13, 18, 17, 16, 11, 12,
    ];
    const SNAKE_LENGTH: usize = 5;

    let mut lit = [false; 25];
    for segment in 0..SNAKE_LENGTH.min(frame + 1) {
        lit[PATH[(frame - segment) % PATH.len()]] = true;
    }

    (0..5)
        .map(|row| {
            Line::from(
                (0..5)
                    .map(|col| {
                        if lit[row * 5 + col] {
                            Span::styled("■ ", theme.text().cyan().bold())
                        } else {
                            Span::styled("□ ", theme.muted().dim())
                        }
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

fn generate_figlet_title(theme: &Theme) -> Vec<Line<'static>> {
    let figlet_lines: Vec<String> = FIGfont::standard()
        .ok()
        .and_then(|font| {
            font.convert(TITLE)
                .map(|figure| figure.to_string().lines().map(String::from).collect())
        })
        .unwrap_or_else(|| vec![TITLE.to_string()]);

    figlet_lines
        .into_iter()
        .map(|line| Line::from(Span::styled(line, theme.panel_title().bold())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lit_cells(frame: usize) -> usize {
        generate_snake_animation(frame, &Theme::default())
            .iter()
            .flat_map(|line| line.spans.iter())
            .filter(|span| span.content.starts_with('■'))
            .count()
    }

    #[test]
    fn test_snake_grows_to_full_length() {
        assert_eq!(lit_cells(0), 1);
        assert_eq!(lit_cells(2), 3);
        assert_eq!(lit_cells(40), 5);
    }
}
