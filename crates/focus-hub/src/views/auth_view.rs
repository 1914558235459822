//! Sign-in View
//!
//! Full-screen token prompt. When the stored token could not be checked at
//! startup the prompt is replaced by a retry / sign-out choice.

use crate::actions::{
    Action, AuthAction, ContextAction, GlobalAction, SessionAction, TextInputAction,
};
use crate::capabilities::PanelCapabilities;
use crate::command_id::CommandId;
use crate::state::{AppState, AuthState};
use crate::views::input_field::render_field;
use crate::views::{footer_hints, View, ViewId};
use focus_hub_theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone)]
pub struct AuthView;

impl AuthView {
    pub fn new() -> Self {
        Self
    }
}

impl View for AuthView {
    fn view_id(&self) -> ViewId {
        ViewId::Auth
    }

    fn render(&self, state: &AppState, area: Rect, f: &mut Frame) {
        render(state, area, f);
    }

    fn capabilities(&self, state: &AppState) -> PanelCapabilities {
        if state.auth.verification_failed.is_some() {
            PanelCapabilities::empty()
        } else {
            PanelCapabilities::TEXT_INPUT
        }
    }

    fn clone_box(&self) -> Box<dyn View> {
        Box::new(self.clone())
    }

    fn translate_text_input(&self, input: TextInputAction) -> Option<Action> {
        let action = match input {
            TextInputAction::Char(c) => AuthAction::Char(c),
            TextInputAction::Backspace => AuthAction::Backspace,
            TextInputAction::ClearLine => AuthAction::Clear,
            TextInputAction::Confirm => AuthAction::Submit,
            TextInputAction::Escape => return Some(Action::Global(GlobalAction::Close)),
        };
        Some(Action::Auth(action))
    }

    fn translate_context_action(&self, action: ContextAction, state: &AppState) -> Option<Action> {
        match action {
            ContextAction::Confirm if state.auth.verification_failed.is_some() => {
                Some(Action::Auth(AuthAction::RetryVerification))
            }
            ContextAction::Confirm => Some(Action::Auth(AuthAction::Submit)),
        }
    }

    fn accepts_action(&self, action: &Action) -> bool {
        matches!(
            action,
            Action::Auth(_)
                | Action::Session(SessionAction::Logout)
                | Action::TextInput(_)
                | Action::ViewContext(_)
                | Action::Global(GlobalAction::Close | GlobalAction::Quit)
        )
    }
}

fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    f.render_widget(Block::default().style(theme.panel_background()), area);

    let panel_width = (area.width * 60 / 100).clamp(40.min(area.width), 72.min(area.width));
    let panel_height = 11.min(area.height);
    let panel_area = Rect {
        x: area.x + area.width.saturating_sub(panel_width) / 2,
        y: area.y + area.height.saturating_sub(panel_height) / 2,
        width: panel_width,
        height: panel_height,
    };
    f.render_widget(Clear, panel_area);

    let hints = match &state.auth.verification_failed {
        Some(_) => footer_hints(
            state,
            &[CommandId::AuthRetry, CommandId::SessionLogout, CommandId::GlobalClose],
        ),
        None => Line::from(vec![
            Span::styled(" Enter", theme.key_hint().bold()),
            Span::styled(" sign in  ", theme.muted()),
            Span::styled("Esc", theme.key_hint().bold()),
            Span::styled(" quit ", theme.muted()),
        ]),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Sign in to GitHub ")
        .title_style(theme.panel_title().add_modifier(Modifier::BOLD))
        .title_bottom(hints)
        .title_alignment(Alignment::Center)
        .border_style(theme.panel_border().add_modifier(Modifier::BOLD))
        .style(theme.panel_background());
    f.render_widget(block, panel_area);

    let inner = panel_area.inner(Margin {
        horizontal: 2,
        vertical: 1,
    });

    match &state.auth.verification_failed {
        Some(message) => render_verification_failed(message, theme, inner, f),
        None => render_token_prompt(&state.auth, theme, inner, f),
    }
}

fn render_token_prompt(auth: &AuthState, theme: &Theme, area: Rect, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Instructions
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Token field
            Constraint::Length(1), // Spacing
            Constraint::Min(1),    // Status
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(
            "Paste a personal access token with the repo scope. It is stored encrypted on this machine.",
        )
        .style(theme.text_secondary())
        .wrap(Wrap { trim: true }),
        chunks[0],
    );

    render_field(
        f,
        chunks[2],
        "Token",
        &auth.masked_input(),
        !auth.submitting,
        theme,
        Some("ghp_…"),
    );

    let status = if auth.submitting {
        Line::from(Span::styled("Verifying token…", theme.warning()))
    } else if let Some(error) = &auth.error {
        Line::from(Span::styled(error.clone(), theme.error()))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(status).wrap(Wrap { trim: true }), chunks[4]);
}

fn render_verification_failed(message: &str, theme: &Theme, area: Rect, f: &mut Frame) {
    let lines = vec![
        Line::from(Span::styled(
            "Your stored token could not be verified.",
            theme.warning(),
        )),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.error())),
        Line::from(""),
        Line::from(Span::styled(
            "Retry once you are back online, or sign out to enter a new token.",
            theme.text_secondary(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
