use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::AppState,
    ui::{components::card::Card, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_search(frame, layout[0], state, &theme);
    render_table(frame, layout[1], state, &theme);
}

fn render_search(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let search = &state.inventory;
    let line = if search.search.is_empty() && !search.searching {
        Line::from(Span::styled(
            "press / to search by name, barcode or location",
            Style::default().fg(theme.dim),
        ))
    } else {
        let mut spans = vec![Span::styled(
            search.search.as_str(),
            Style::default().fg(theme.text),
        )];
        if search.searching {
            spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
        }
        Line::from(spans)
    };

    Card::new("Search", theme)
        .focused(search.searching)
        .render_with(frame, area, Paragraph::new(line));
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let items = state.filtered_items();
    let title = format!("Items ({}/{})", items.len(), state.items.len());
    let card = Card::new(&title, theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if items.is_empty() {
        let message = if state.items.is_empty() {
            "No items yet, press n to register one"
        } else {
            "Nothing matches the search"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(theme.dim))),
            inner,
        );
        return;
    }

    let header = Row::new(["Barcode", "Name", "Stock", "Location", ""])
        .style(Style::default().fg(theme.text_muted).add_modifier(Modifier::BOLD));

    let rows = items.iter().map(|item| {
        let low = item.is_low();
        let stock_style = if low {
            Style::default().fg(theme.negative).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        let badge = if low {
            Cell::from(Span::styled(
                "LOW",
                Style::default().fg(theme.negative).add_modifier(Modifier::BOLD),
            ))
        } else {
            Cell::from("")
        };

        Row::new(vec![
            Cell::from(Span::styled(item.barcode.as_str(), Style::default().fg(theme.dim))),
            Cell::from(item.item_name.as_str()),
            Cell::from(Span::styled(format!("{} {}", item.qty, item.unit), stock_style)),
            Cell::from(item.location_label()),
            badge,
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Min(16),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(4),
        ],
    )
    .header(header)
    .row_highlight_style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::REVERSED),
    );

    let mut table_state = TableState::default().with_selected(Some(state.inventory.selected));
    frame.render_stateful_widget(table, inner, &mut table_state);
}
