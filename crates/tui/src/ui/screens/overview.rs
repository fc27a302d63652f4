use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            charts::{ascii_bar, render_usage_chart},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6)])
        .split(area);

    render_stats(frame, layout[0], state, &theme);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(layout[1]);

    render_usage_chart(
        frame,
        body[0],
        "Usage, last 7 days",
        &state.dashboard.daily_usage_chart,
        &theme,
    );
    render_low_stock(frame, body[1], state, &theme);
}

fn render_stats(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let stats = state.stats();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    StatCard::new("Items", stats.local.total_items, "registered", theme).render(frame, cols[0]);
    StatCard::new("Urgent", stats.server.low_stock, "at or below minimum", theme)
        .alert(stats.server.low_stock > 0)
        .render(frame, cols[1]);
    StatCard::new(
        "Today",
        stats.local.today_transactions,
        "transactions",
        theme,
    )
    .render(frame, cols[2]);
}

fn render_low_stock(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let low = &state.dashboard.low_stock_items;
    let card = Card::new("Low stock", theme).alert(!low.is_empty());
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if low.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Everything is in stock",
                Style::default().fg(theme.positive),
            )),
            inner,
        );
        return;
    }

    let bar_width = (inner.width as usize / 4).clamp(4, 12);
    let rows = low
        .iter()
        .map(|item| {
            let max = item.min_qty.max(1) as u64;
            let level = ascii_bar(item.qty.max(0) as u64, max, bar_width);
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        item.item_name.as_str(),
                        Style::default()
                            .fg(theme.text)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", item.barcode),
                        Style::default().fg(theme.dim),
                    ),
                ]),
                Line::from(vec![
                    Span::styled(level, Style::default().fg(theme.negative)),
                    Span::styled(
                        format!(" {} {}", item.qty, item.unit),
                        Style::default().fg(theme.negative),
                    ),
                    Span::styled(
                        format!("  @ {}", item.location_label()),
                        Style::default().fg(theme.text_muted),
                    ),
                ]),
            ])
        })
        .collect::<Vec<_>>();

    frame.render_widget(List::new(rows), inner);
}
