use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::ui::theme::Theme;

/// Rounded container used for every dashboard panel.
pub struct Card<'a> {
    title: &'a str,
    theme: &'a Theme,
    focused: bool,
    alert: bool,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            theme,
            focused: false,
            alert: false,
        }
    }

    /// Mark this card as focused (uses accent border color).
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Draw the border in the error color, for panels that need attention.
    pub fn alert(mut self, alert: bool) -> Self {
        self.alert = alert;
        self
    }

    pub fn block(&self) -> Block<'a> {
        let border_color = if self.alert {
            self.theme.negative
        } else if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };

        Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.theme.accent),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(self.theme.surface))
    }

    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    pub fn render_frame(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(self.block(), area);
    }

    pub fn render_with<W: Widget>(&self, frame: &mut Frame<'_>, area: Rect, content: W) {
        let inner = self.inner(area);
        frame.render_widget(self.block(), area);
        frame.render_widget(content, inner);
    }
}

/// Big number with a caption underneath.
pub struct StatCard<'a> {
    title: &'a str,
    value: String,
    caption: &'a str,
    alert: bool,
    theme: &'a Theme,
}

impl<'a> StatCard<'a> {
    pub fn new(title: &'a str, value: impl ToString, caption: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            value: value.to_string(),
            caption,
            alert: false,
            theme,
        }
    }

    pub fn alert(mut self, alert: bool) -> Self {
        self.alert = alert;
        self
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let value_color = if self.alert {
            self.theme.negative
        } else {
            self.theme.text
        };

        let lines = vec![
            Line::from(Span::styled(
                self.value.clone(),
                Style::default()
                    .fg(value_color)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.caption,
                Style::default().fg(self.theme.dim),
            )),
        ];

        Card::new(self.title, self.theme)
            .alert(self.alert)
            .render_with(frame, area, Paragraph::new(lines));
    }
}
