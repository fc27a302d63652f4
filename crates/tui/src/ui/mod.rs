pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, View},
    ui::theme::Theme,
};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.view, &theme);

    match state.view {
        View::Overview => screens::overview::render(frame, layout[2], state),
        View::Inventory => screens::inventory::render(frame, layout[2], state),
        View::History => screens::history::render(frame, layout[2], state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
    screens::modal::render(frame, area, &state.modal);
    components::toast::render(frame, area, state.notice.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let (endpoint, endpoint_style) = match state.endpoint.as_deref() {
        Some(host) => (host, Style::default().fg(theme.positive)),
        None => ("not configured", Style::default().fg(theme.error)),
    };
    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut spans = vec![
        Span::styled(
            "STORE ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            state.today.format("%a %d %b %Y").to_string(),
            Style::default().fg(theme.text),
        ),
        Span::raw("  "),
        Span::styled("Sheet", Style::default().fg(theme.text_muted)),
        Span::raw(": "),
        Span::styled(endpoint, endpoint_style),
        Span::raw("  "),
        Span::styled("Refresh", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}")),
    ];
    if state.is_loading() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "loading…",
            Style::default().fg(theme.warning),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = Vec::new();

    if let Some(kind) = state.modal.state().kind() {
        parts.extend(components::hints::hints_to_spans(
            &components::hints::for_modal(kind),
            theme,
        ));
    } else {
        let searching = state.inventory.searching;
        parts.extend(components::hints::hints_to_spans(
            &components::hints::for_view(state.view, searching),
            theme,
        ));
        if !searching {
            parts.push(components::hints::hint_separator(theme));
            parts.extend(components::hints::hints_to_spans(
                &components::hints::global(),
                theme,
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
