use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{NoticeLevel, state::Notice},
    ui::theme::Theme,
};

/// Draws the status notice in the top-right corner, under the tab bar.
pub fn render(frame: &mut Frame<'_>, area: Rect, notice: Option<&Notice>) {
    let Some(notice) = notice else {
        return;
    };
    let theme = Theme::default();
    let (icon, color) = match notice.level {
        NoticeLevel::Success => ("✔", theme.positive),
        NoticeLevel::Error => ("✖", theme.error),
    };
    let text = format!("{icon} {}", notice.message);

    let width = (text.chars().count() + 4).min(area.width as usize) as u16;
    let height = 3u16.min(area.height);
    let x = area.x + area.width.saturating_sub(width + 1);
    let y = area.y + 3.min(area.height.saturating_sub(height));
    let rect = Rect {
        x,
        y,
        width,
        height,
    };

    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(Line::from(text)).style(style).block(block), rect);
}
