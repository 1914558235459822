//! Add Repository View
//!
//! Floating form that checks a repository exists before adding it to the
//! watchlist. Accepts `owner/name` or a pasted GitHub URL.

use crate::actions::{Action, AddRepositoryAction, ContextAction, GlobalAction, TextInputAction};
use crate::capabilities::PanelCapabilities;
use crate::state::{AddRepoFormState, AddRepoStatus, AppState};
use crate::views::input_field::render_field;
use crate::views::{View, ViewId};
use focus_hub_theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone)]
pub struct AddRepositoryView;

impl AddRepositoryView {
    pub fn new() -> Self {
        Self
    }
}

impl View for AddRepositoryView {
    fn view_id(&self) -> ViewId {
        ViewId::AddRepository
    }

    fn render(&self, state: &AppState, area: Rect, f: &mut Frame) {
        render(&state.add_repo_form, &state.theme, area, f);
    }

    fn capabilities(&self, _state: &AppState) -> PanelCapabilities {
        PanelCapabilities::TEXT_INPUT
    }

    fn clone_box(&self) -> Box<dyn View> {
        Box::new(self.clone())
    }

    fn translate_text_input(&self, input: TextInputAction) -> Option<Action> {
        let action = match input {
            TextInputAction::Char(c) => AddRepositoryAction::Char(c),
            TextInputAction::Backspace => AddRepositoryAction::Backspace,
            TextInputAction::ClearLine => AddRepositoryAction::ClearField,
            TextInputAction::Confirm => AddRepositoryAction::Confirm,
            TextInputAction::Escape => return Some(Action::Global(GlobalAction::Close)),
        };
        Some(Action::AddRepository(action))
    }

    fn translate_context_action(&self, action: ContextAction, _state: &AppState) -> Option<Action> {
        match action {
            ContextAction::Confirm => Some(Action::AddRepository(AddRepositoryAction::Confirm)),
        }
    }

    fn accepts_action(&self, action: &Action) -> bool {
        matches!(
            action,
            Action::AddRepository(_)
                | Action::ViewContext(_)
                | Action::TextInput(_)
                | Action::Global(GlobalAction::Close | GlobalAction::Quit)
        )
    }
}

fn render(form: &AddRepoFormState, theme: &Theme, area: Rect, f: &mut Frame) {
    // Dim everything underneath
    let overlay = Block::default().style(Style::default().bg(Color::Black).add_modifier(Modifier::DIM));
    f.render_widget(overlay, area);

    let popup_width = (area.width * 60 / 100).clamp(44.min(area.width), 72.min(area.width));
    let popup_height = 9.min(area.height);
    let popup_area = Rect {
        x: area.x + area.width.saturating_sub(popup_width) / 2,
        y: area.y + area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    f.render_widget(Clear, popup_area);
    f.render_widget(Block::default().style(theme.panel_background()), popup_area);

    let footer_hint = Line::from(vec![
        Span::styled(" Enter", theme.key_hint().bold()),
        Span::styled(" add  ", theme.muted()),
        Span::styled("Ctrl+U", theme.key_hint().bold()),
        Span::styled(" clear  ", theme.muted()),
        Span::styled("Esc", theme.key_hint().bold()),
        Span::styled(" cancel ", theme.muted()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Add Repository ")
        .title_style(theme.panel_title().add_modifier(Modifier::BOLD))
        .title_bottom(footer_hint)
        .title_alignment(Alignment::Center)
        .border_style(theme.panel_border().add_modifier(Modifier::BOLD))
        .style(theme.panel_background());
    f.render_widget(block, popup_area);

    let inner = popup_area.inner(Margin {
        horizontal: 2,
        vertical: 1,
    });

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Instructions
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Repository field
            Constraint::Length(1), // Spacing
            Constraint::Min(1),    // Status
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Enter a repository or paste its GitHub URL:",
            theme.text_secondary(),
        ))),
        chunks[0],
    );

    render_field(
        f,
        chunks[2],
        "Repository",
        &form.input,
        !form.is_submitting(),
        theme,
        Some("owner/name or https://github.com/owner/name"),
    );

    let status = match &form.status {
        AddRepoStatus::Idle => Line::from(""),
        AddRepoStatus::Loading => Line::from(Span::styled(
            format!("Checking {}…", form.normalized()),
            theme.warning(),
        )),
        AddRepoStatus::Success => Line::from(Span::styled("Added", theme.success())),
        AddRepoStatus::Error(message) => Line::from(Span::styled(message.clone(), theme.error())),
    };
    f.render_widget(Paragraph::new(status).wrap(Wrap { trim: true }), chunks[4]);
}
