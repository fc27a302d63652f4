use ratatui::{style::Style, text::Span};

use crate::{
    app::{ModalKind, View},
    ui::theme::Theme,
};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(theme.text_muted),
        ));
    }

    spans
}

/// Creates a separator span for dividing hint groups.
pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Hints that apply to the whole screen.
pub fn global() -> Vec<KeyHint> {
    vec![
        KeyHint::new("1-3", "view"),
        KeyHint::new("r", "refresh"),
        KeyHint::new("q", "quit"),
    ]
}

/// Hints for the active view.
pub fn for_view(view: View, searching: bool) -> Vec<KeyHint> {
    match view {
        View::Inventory if searching => vec![
            KeyHint::new("type", "filter"),
            KeyHint::new("Enter", "done"),
            KeyHint::new("Esc", "clear"),
        ],
        View::Inventory => vec![
            KeyHint::new("↑↓", "select"),
            KeyHint::new("/", "search"),
            KeyHint::new("n", "new"),
            KeyHint::new("-", "out"),
            KeyHint::new("+", "in"),
            KeyHint::new("e", "edit"),
            KeyHint::new("d", "delete"),
        ],
        View::History => vec![KeyHint::new("↑↓", "scroll")],
        View::Overview => vec![KeyHint::new("Tab", "next view")],
    }
}

/// Hints for the open form.
pub fn for_modal(kind: ModalKind) -> Vec<KeyHint> {
    match kind {
        ModalKind::Delete => vec![
            KeyHint::new("Enter", "confirm"),
            KeyHint::new("Esc", "cancel"),
        ],
        _ => vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("Enter", "save"),
            KeyHint::new("Esc", "cancel"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_lists_mutation_keys() {
        let keys = for_view(View::Inventory, false)
            .into_iter()
            .map(|hint| hint.key)
            .collect::<Vec<_>>();
        for key in ["/", "n", "-", "+", "e", "d"] {
            assert!(keys.contains(&key), "missing {key}");
        }
    }

    #[test]
    fn search_mode_replaces_view_hints() {
        let hints = for_view(View::Inventory, true);
        assert!(hints.iter().all(|hint| hint.key != "n"));
    }

    #[test]
    fn spans_alternate_key_and_action() {
        let theme = Theme::default();
        let spans = hints_to_spans(&[KeyHint::new("q", "quit"), KeyHint::new("r", "refresh")], &theme);
        assert_eq!(spans.len(), 5);
        assert_eq!(spans[0].content, "q");
        assert_eq!(spans[1].content, " quit");
    }
}
