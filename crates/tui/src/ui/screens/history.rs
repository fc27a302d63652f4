use api_types::transaction::TransactionAction;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
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
    let title = format!("History ({})", state.transactions.len());
    let card = Card::new(&title, &theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if state.transactions.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No history yet",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    }

    let header = Row::new(["Date", "Time", "Item", "Action", "Qty", "Requestor", "Project"])
        .style(
            Style::default()
                .fg(theme.text_muted)
                .add_modifier(Modifier::BOLD),
        );

    let rows = state.transactions.iter().map(|tx| {
        // Anything that is not an inflow reads as a withdrawal.
        let (sign, color) = match tx.action {
            TransactionAction::In => ('+', theme.positive),
            _ => ('-', theme.negative),
        };

        Row::new(vec![
            Cell::from(tx.date()),
            Cell::from(Span::styled(tx.time(), Style::default().fg(theme.dim))),
            Cell::from(Line::from(vec![
                Span::raw(tx.item_name.as_str()),
                Span::styled(format!(" {}", tx.barcode), Style::default().fg(theme.dim)),
            ])),
            Cell::from(Span::styled(tx.action.as_str(), Style::default().fg(color))),
            Cell::from(Span::styled(
                format!("{sign}{}", tx.qty.unsigned_abs()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Cell::from(tx.requestor.as_str()),
            Cell::from(tx.project.as_str()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Min(20),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(14),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut table_state = TableState::default().with_selected(Some(state.history.selected));
    frame.render_stateful_widget(table, inner, &mut table_state);
}
