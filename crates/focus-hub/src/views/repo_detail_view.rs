//! Repository Detail View
//!
//! Open pull requests of one repository with merge and reject triage.

use crate::actions::{Action, ContextAction, GlobalAction, NavigationAction, RepoDetailAction};
use crate::capabilities::PanelCapabilities;
use crate::command_id::CommandId;
use crate::state::{AppState, DetailLoad, RepoDetailState, TriageOperation};
use crate::view_models::StatusBarViewModel;
use crate::views::status_bar::StatusBarWidget;
use crate::views::{footer_hints, View, ViewId};
use focus_hub_theme::Theme;
use gh_client::PullRequest;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

const NO_DESCRIPTION: &str = "No description provided.";

#[derive(Debug, Clone)]
pub struct RepoDetailView;

impl RepoDetailView {
    pub fn new() -> Self {
        Self
    }
}

impl View for RepoDetailView {
    fn view_id(&self) -> ViewId {
        ViewId::RepoDetail
    }

    fn render(&self, state: &AppState, area: Rect, f: &mut Frame) {
        render(state, area, f);
    }

    fn capabilities(&self, _state: &AppState) -> PanelCapabilities {
        PanelCapabilities::empty()
    }

    fn clone_box(&self) -> Box<dyn View> {
        Box::new(self.clone())
    }

    fn translate_navigation(&self, nav: NavigationAction) -> Option<Action> {
        let action = match nav {
            NavigationAction::Next => RepoDetailAction::SelectNext,
            NavigationAction::Previous => RepoDetailAction::SelectPrevious,
        };
        Some(Action::RepoDetail(action))
    }

    fn translate_context_action(&self, action: ContextAction, state: &AppState) -> Option<Action> {
        match action {
            ContextAction::Confirm if state.repo_detail.merge_prompt => {
                Some(Action::RepoDetail(RepoDetailAction::ConfirmMerge))
            }
            ContextAction::Confirm => Some(Action::RepoDetail(RepoDetailAction::OpenInBrowser)),
        }
    }

    fn accepts_action(&self, action: &Action) -> bool {
        matches!(
            action,
            Action::RepoDetail(_)
                | Action::ViewContext(_)
                | Action::Navigate(_)
                | Action::Global(GlobalAction::Close | GlobalAction::Quit)
        )
    }
}

fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let detail = &state.repo_detail;
    f.render_widget(Clear, area);
    f.render_widget(Block::default().style(theme.panel_background()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Repository header
            Constraint::Min(3),    // Pull request table
            Constraint::Length(6), // Selected pull request
            Constraint::Length(1), // Key hints
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(detail, theme, chunks[0], f);

    match &detail.load {
        DetailLoad::Idle | DetailLoad::Loading => {
            render_message(
                Span::styled("Loading pull requests…", theme.warning()),
                chunks[1],
                f,
            );
        }
        DetailLoad::Failed(message) => {
            let lines = vec![
                Line::from(Span::styled("Failed to load repository data.", theme.error().bold())),
                Line::from(Span::styled(message.clone(), theme.muted())),
            ];
            f.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true }),
                chunks[1],
            );
        }
        DetailLoad::Loaded if detail.pull_requests.is_empty() => {
            render_message(
                Span::styled("No open pull requests", theme.muted()),
                chunks[1],
                f,
            );
        }
        DetailLoad::Loaded => {
            render_table(detail, theme, chunks[1], f);
            render_selected(detail, theme, chunks[2], f);
        }
    }

    f.render_widget(
        Paragraph::new(footer_hints(
            state,
            &[
                CommandId::PrMerge,
                CommandId::PrReject,
                CommandId::PrOpenInBrowser,
                CommandId::GlobalClose,
            ],
        )),
        chunks[3],
    );

    let status_vm = StatusBarViewModel::from_state(state);
    f.render_widget(StatusBarWidget(&status_vm), chunks[4]);

    if detail.merge_prompt {
        if let Some(pr) = detail.selected_pull_request() {
            render_merge_prompt(state, pr.number, area, f);
        }
    }
}

fn render_message(message: Span<'static>, area: Rect, f: &mut Frame) {
    let vertical = area.inner(Margin {
        horizontal: 0,
        vertical: area.height / 2,
    });
    f.render_widget(
        Paragraph::new(Line::from(message)).alignment(Alignment::Center),
        vertical,
    );
}

fn render_header(detail: &RepoDetailState, theme: &Theme, area: Rect, f: &mut Frame) {
    let mut lines = vec![Line::from(vec![
        Span::styled(format!(" {}", detail.full_name), theme.panel_title().bold()),
        Span::styled(format!("  {}", detail.html_url), theme.muted()),
    ])];

    if let Some(repository) = &detail.repository {
        lines.push(Line::from(Span::styled(
            format!(
                " {}",
                repository.description.as_deref().unwrap_or(NO_DESCRIPTION)
            ),
            theme.text_secondary(),
        )));
        lines.push(Line::from(vec![
            Span::styled(
                format!(" ★ {}  ", repository.stargazers_count),
                Style::default().fg(theme.metric_stars),
            ),
            Span::styled(
                format!("⑂ {}  ", repository.forks_count),
                Style::default().fg(theme.metric_forks),
            ),
            Span::styled(
                format!("◎ {}  ", repository.open_issues_count),
                Style::default().fg(theme.metric_issues),
            ),
            Span::styled(
                format!("⇄ {}", detail.pull_requests.len()),
                Style::default().fg(theme.metric_pulls),
            ),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// Short label for whatever is running against `number`
fn operation_label(detail: &RepoDetailState, number: u64) -> Option<&'static str> {
    match detail.in_flight {
        Some(TriageOperation::Merge(n)) if n == number => Some("merging…"),
        Some(TriageOperation::Reject(n)) if n == number => Some("closing…"),
        _ => None,
    }
}

fn render_table(detail: &RepoDetailState, theme: &Theme, area: Rect, f: &mut Frame) {
    let header = Row::new(["  #", "Title", "Author", "Branch", "Updated", ""])
        .style(theme.panel_title().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = detail
        .pull_requests
        .iter()
        .enumerate()
        .map(|(index, pr)| {
            let selected = detail.selected == Some(index);
            let branch = match pr.head_repository_full_name() {
                Some(full_name) if full_name == detail.full_name => pr.head.ref_name.clone(),
                Some(full_name) => format!("{}:{}", full_name, pr.head.ref_name),
                None => format!("(deleted fork):{}", pr.head.ref_name),
            };
            let marker = if selected && detail.reject_armed {
                Cell::from("press x again to reject").style(theme.danger())
            } else if let Some(label) = operation_label(detail, pr.number) {
                Cell::from(label).style(theme.warning())
            } else {
                Cell::from("")
            };

            Row::new(vec![
                Cell::from(format!("  #{}", pr.number)),
                Cell::from(pr.title.clone()),
                Cell::from(pr.user.login.clone()),
                Cell::from(branch),
                Cell::from(pr.updated_at.format("%Y-%m-%d").to_string()),
                marker,
            ])
            .style(if selected && detail.reject_armed {
                Style::default().bg(theme.danger_bg).fg(theme.text_primary)
            } else {
                theme.text()
            })
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(20),
            Constraint::Length(16),
            Constraint::Length(24),
            Constraint::Length(11),
            Constraint::Length(24),
        ],
    )
    .header(header)
    .row_highlight_style(theme.table_selected())
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.panel_border())
            .title(Span::styled(" Open pull requests ", theme.panel_title())),
    );

    let mut table_state = TableState::default().with_selected(detail.selected);
    f.render_stateful_widget(table, area, &mut table_state);
}

fn render_selected(detail: &RepoDetailState, theme: &Theme, area: Rect, f: &mut Frame) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border_inactive());

    let Some(pr) = detail.selected_pull_request() else {
        f.render_widget(
            Paragraph::new(Span::styled(" Select a pull request with j/k", theme.muted()))
                .block(block),
            area,
        );
        return;
    };

    let body = pr
        .body
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .unwrap_or(NO_DESCRIPTION);
    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" #{} ", pr.number), theme.accent().bold()),
            Span::styled(pr.title.clone(), theme.text().bold()),
            Span::styled(format!("  into {}", pr.base.ref_name), theme.muted()),
        ]),
        Line::from(Span::styled(format!(" {}", body), theme.text_secondary())),
    ];
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_merge_prompt(state: &AppState, number: u64, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let overlay = Block::default().style(Style::default().bg(Color::Black).add_modifier(Modifier::DIM));
    f.render_widget(overlay, area);

    let popup_width = 52.min(area.width);
    let popup_height = 5.min(area.height);
    let popup_area = Rect {
        x: area.x + area.width.saturating_sub(popup_width) / 2,
        y: area.y + area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Merge ")
        .title_style(theme.panel_title().add_modifier(Modifier::BOLD))
        .title_bottom(footer_hints(state, &[CommandId::ConfirmYes, CommandId::ConfirmNo]))
        .title_alignment(Alignment::Center)
        .border_style(theme.warning())
        .style(theme.panel_background());

    let question = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Are you sure you want to MERGE PR #{}?", number),
            theme.text().bold(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(question, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::pull_request;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enter_confirms_open_merge_prompt() {
        let mut state = AppState::default();
        let view = RepoDetailView::new();

        let action = view.translate_context_action(ContextAction::Confirm, &state);
        assert!(matches!(
            action,
            Some(Action::RepoDetail(RepoDetailAction::OpenInBrowser))
        ));

        state.repo_detail.merge_prompt = true;
        let action = view.translate_context_action(ContextAction::Confirm, &state);
        assert!(matches!(
            action,
            Some(Action::RepoDetail(RepoDetailAction::ConfirmMerge))
        ));
    }

    #[test]
    fn test_operation_label_only_for_running_pr() {
        let mut detail = RepoDetailState::default();
        detail.pull_requests = vec![pull_request(7, None, "x"), pull_request(9, None, "y")];
        detail.in_flight = Some(TriageOperation::Merge(7));
        assert_eq!(operation_label(&detail, 7), Some("merging…"));
        assert_eq!(operation_label(&detail, 9), None);
    }

    #[test]
    fn test_view_ignores_dashboard_actions() {
        let view = RepoDetailView::new();
        assert!(!view.accepts_action(&Action::Global(GlobalAction::PushView(Box::new(
            RepoDetailView::new()
        )))));
        assert!(view.accepts_action(&Action::RepoDetail(RepoDetailAction::Reject)));
    }
}
