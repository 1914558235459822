//! Dashboard View
//!
//! Grid of repository cards for the watchlist, with a filter line, key hints
//! and the status bar.

use crate::actions::{
    Action, ContextAction, DashboardAction, NavigationAction, SessionAction, TextInputAction,
};
use crate::capabilities::PanelCapabilities;
use crate::command_id::CommandId;
use crate::state::{AppState, DashboardState};
use crate::view_models::{RepositoryCardViewModel, StatusBarViewModel};
use crate::views::status_bar::StatusBarWidget;
use crate::views::{footer_hints, View, ViewId};
use focus_hub_theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const CARD_HEIGHT: u16 = 5;

#[derive(Debug, Clone)]
pub struct DashboardView;

impl DashboardView {
    pub fn new() -> Self {
        Self
    }
}

impl View for DashboardView {
    fn view_id(&self) -> ViewId {
        ViewId::Dashboard
    }

    fn render(&self, state: &AppState, area: Rect, f: &mut Frame) {
        render(state, area, f);
    }

    fn capabilities(&self, state: &AppState) -> PanelCapabilities {
        if state.dashboard.filter_active {
            PanelCapabilities::TEXT_INPUT | PanelCapabilities::ITEM_NAVIGATION
        } else {
            PanelCapabilities::empty()
        }
    }

    fn clone_box(&self) -> Box<dyn View> {
        Box::new(self.clone())
    }

    fn translate_navigation(&self, nav: NavigationAction) -> Option<Action> {
        let action = match nav {
            NavigationAction::Next => DashboardAction::SelectNext,
            NavigationAction::Previous => DashboardAction::SelectPrevious,
        };
        Some(Action::Dashboard(action))
    }

    fn translate_text_input(&self, input: TextInputAction) -> Option<Action> {
        let action = match input {
            TextInputAction::Char(c) => DashboardAction::FilterChar(c),
            TextInputAction::Backspace => DashboardAction::FilterBackspace,
            TextInputAction::ClearLine => DashboardAction::FilterClear,
            TextInputAction::Escape => DashboardAction::CancelFilter,
            TextInputAction::Confirm => DashboardAction::ApplyFilter,
        };
        Some(Action::Dashboard(action))
    }

    fn translate_context_action(&self, action: ContextAction, _state: &AppState) -> Option<Action> {
        match action {
            ContextAction::Confirm => Some(Action::Dashboard(DashboardAction::OpenDetail)),
        }
    }

    fn accepts_action(&self, action: &Action) -> bool {
        matches!(
            action,
            Action::Dashboard(_)
                | Action::Session(SessionAction::Logout)
                | Action::ViewContext(_)
                | Action::Navigate(_)
                | Action::TextInput(_)
                | Action::Global(_)
        )
    }
}

fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let dashboard = &state.dashboard;
    f.render_widget(Block::default().style(theme.panel_background()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Filter
            Constraint::Min(0),    // Cards
            Constraint::Length(1), // Key hints
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(state, chunks[0], f);
    render_filter(dashboard, theme, chunks[1], f);

    if dashboard.summaries.is_empty() && !dashboard.loading {
        render_empty(state, chunks[2], f);
    } else {
        render_cards(dashboard, theme, chunks[2], f);
    }

    let hints = if dashboard.filter_active {
        Line::from(vec![
            Span::styled(" Enter", theme.key_hint().bold()),
            Span::styled(" apply  ", theme.muted()),
            Span::styled("Esc", theme.key_hint().bold()),
            Span::styled(" clear  ", theme.muted()),
            Span::styled("↑/↓", theme.key_hint().bold()),
            Span::styled(" select ", theme.muted()),
        ])
    } else {
        footer_hints(
            state,
            &[
                CommandId::Confirm,
                CommandId::FilterStart,
                CommandId::RepositoryRefresh,
                CommandId::RepositoryReloadAll,
                CommandId::RepositoryAdd,
                CommandId::RepositoryRemove,
                CommandId::RepositoryOpenInBrowser,
                CommandId::SessionLogout,
                CommandId::GlobalClose,
            ],
        )
    };
    f.render_widget(Paragraph::new(hints), chunks[3]);

    let status_vm = StatusBarViewModel::from_state(state);
    f.render_widget(StatusBarWidget(&status_vm), chunks[4]);
}

fn render_header(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let login = state
        .session
        .user
        .as_ref()
        .map(|u| format!("@{}", u.login))
        .unwrap_or_default();

    let mut spans = vec![
        Span::styled(" FocusHub ", theme.panel_title().add_modifier(Modifier::BOLD)),
        Span::styled(login, theme.accent()),
        Span::styled(
            format!("  {} repositories", state.session.watchlist.len()),
            theme.muted(),
        ),
    ];
    if state.dashboard.loading {
        spans.push(Span::styled("  loading…", theme.warning()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_filter(dashboard: &DashboardState, theme: &Theme, area: Rect, f: &mut Frame) {
    if !dashboard.filter_active && dashboard.filter.is_empty() {
        return;
    }
    let mut spans = vec![
        Span::styled(" / ", theme.key_hint().bold()),
        Span::styled(dashboard.filter.clone(), theme.text()),
    ];
    if dashboard.filter_active {
        spans.push(Span::styled("▌", theme.accent()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_empty(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let hint = state
        .keymap
        .hint_for_command(CommandId::RepositoryAdd)
        .unwrap_or("a")
        .to_string();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Your watchlist is empty", theme.text().bold())),
        Line::from(vec![
            Span::styled("Press ", theme.muted()),
            Span::styled(hint, theme.key_hint().bold()),
            Span::styled(" to add a repository", theme.muted()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn columns_for(width: u16) -> usize {
    match width {
        w if w >= 120 => 3,
        w if w >= 80 => 2,
        _ => 1,
    }
}

fn render_cards(dashboard: &DashboardState, theme: &Theme, area: Rect, f: &mut Frame) {
    let visible = dashboard.visible();
    if visible.is_empty() {
        let message = format!("No repositories match '{}'", dashboard.filter);
        f.render_widget(
            Paragraph::new(Span::styled(message, theme.muted())).alignment(Alignment::Center),
            area,
        );
        return;
    }

    let columns = columns_for(area.width);
    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
    let selected_row = dashboard.selected / columns;
    let first_row = selected_row.saturating_sub(visible_rows - 1);
    let card_width = area.width / columns as u16;

    for (index, summary) in visible.iter().enumerate() {
        let row = index / columns;
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let card_area = Rect {
            x: area.x + (index % columns) as u16 * card_width,
            y: area.y + (row - first_row) as u16 * CARD_HEIGHT,
            width: card_width,
            height: CARD_HEIGHT.min(area.height),
        };
        let vm = RepositoryCardViewModel::from_summary(summary, index == dashboard.selected, theme);
        render_card(&vm, index == dashboard.selected, theme, card_area, f);
    }
}

fn render_card(
    vm: &RepositoryCardViewModel,
    selected: bool,
    theme: &Theme,
    area: Rect,
    f: &mut Frame,
) {
    let title_style = if selected {
        theme.table_selected()
    } else {
        theme.panel_title()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(vm.border_style)
        .title(Span::styled(format!(" {} ", vm.title), title_style))
        .title(Line::from(Span::styled(vm.badge.clone(), theme.muted())).right_aligned())
        .style(theme.panel_background());

    let mut metrics = vec![Span::raw(" ")];
    for (icon, value, style) in &vm.metrics {
        metrics.push(Span::styled(format!("{} {}  ", icon, value), *style));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled(" by ", theme.muted()),
            Span::styled(vm.owner.clone(), theme.text()),
        ]),
        Line::from(Span::styled(format!(" {}", vm.description), vm.description_style)),
        Line::from(metrics),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}
