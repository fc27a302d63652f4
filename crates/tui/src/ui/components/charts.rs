use api_types::dashboard::DailyUsage;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Paragraph},
};

use crate::ui::{components::card::Card, theme::Theme};

/// Ceiling used when every day is zero, so empty bars stay flat.
const EMPTY_SCALE: u64 = 10;

/// Daily outflow bars, oldest first; the most recent day is highlighted.
pub fn render_usage_chart(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    usage: &[DailyUsage],
    theme: &Theme,
) {
    let card = Card::new(title, theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if usage.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::styled(
                "No withdrawals recorded yet",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let last = usage.len() - 1;
    let bars = usage
        .iter()
        .enumerate()
        .map(|(index, day)| {
            let color = if index == last { theme.accent } else { theme.dim };
            Bar::default()
                .value(day.usage.max(0) as u64)
                .label(Line::from(day.date.clone()))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .fg(theme.text)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect::<Vec<_>>();

    let count = bars.len() as u16;
    let bar_width = (inner.width / count.max(1)).saturating_sub(1).clamp(1, 9);

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max(scale(usage))
        .label_style(Style::default().fg(theme.text_muted));

    frame.render_widget(chart, inner);
}

/// Top of the chart: the busiest day, or a fixed ceiling when all are zero.
#[must_use]
pub fn scale(usage: &[DailyUsage]) -> u64 {
    usage
        .iter()
        .map(|day| day.usage.max(0) as u64)
        .max()
        .filter(|max| *max > 0)
        .unwrap_or(EMPTY_SCALE)
}

/// Creates a simple ASCII-based horizontal bar for inline use.
///
/// Returns a string like `████████░░░░░░░░░░░░` representing the ratio.
#[must_use]
pub fn ascii_bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = (value as f64 / max as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, usage: i64) -> DailyUsage {
        DailyUsage {
            date: date.to_string(),
            usage,
        }
    }

    #[test]
    fn scale_uses_busiest_day() {
        let usage = vec![day("12/10", 4), day("13/10", 9), day("14/10", 0)];
        assert_eq!(scale(&usage), 9);
    }

    #[test]
    fn scale_falls_back_when_idle() {
        let usage = vec![day("12/10", 0), day("13/10", 0)];
        assert_eq!(scale(&usage), EMPTY_SCALE);
        assert_eq!(scale(&[]), EMPTY_SCALE);
    }

    #[test]
    fn ascii_bar_fills_by_ratio() {
        assert_eq!(ascii_bar(5, 10, 4), "██░░");
        assert_eq!(ascii_bar(20, 10, 3), "███");
        assert_eq!(ascii_bar(1, 0, 2), "░░");
    }
}
