use api_types::item::Item;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    app::{
        ModalKind, ModalState,
        modal::{Field, ModalController},
    },
    ui::{
        components::{card::Card, centered_box, hints},
        theme::Theme,
    },
};

const WIDTH: u16 = 56;

fn title(kind: ModalKind) -> &'static str {
    match kind {
        ModalKind::Create => "Register item",
        ModalKind::CheckOut => "Check out",
        ModalKind::CheckIn => "Check in",
        ModalKind::Edit => "Edit item",
        ModalKind::Delete => "Delete item",
    }
}

pub fn render(frame: &mut Frame<'_>, area: Rect, modal: &ModalController) {
    let state = modal.state();
    let Some(kind) = state.kind() else {
        return;
    };
    let theme = Theme::default();

    let mut lines = Vec::new();
    match state {
        ModalState::Adjusting { item, .. } => lines.extend(stock_header(item, &theme)),
        ModalState::Editing { item, .. } => lines.push(Line::from(Span::styled(
            format!("Barcode {}", item.barcode),
            Style::default().fg(theme.dim),
        ))),
        ModalState::Deleting { item } => lines.extend(delete_body(item, &theme)),
        ModalState::Creating { .. } | ModalState::Closed => {}
    }
    if !lines.is_empty() {
        lines.push(Line::default());
    }

    lines.extend(form_lines(modal, &theme));

    lines.push(Line::default());
    if modal.is_submitting() {
        lines.push(Line::from(Span::styled(
            "Saving…",
            Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
        )));
    } else if let Some(error) = modal.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(hints::hints_to_spans(&hints::for_modal(kind), &theme)));

    let height = lines.len() as u16 + 2;
    let rect = centered_box(WIDTH, height, area);
    let card = Card::new(title(kind), &theme)
        .focused(true)
        .alert(kind == ModalKind::Delete);

    frame.render_widget(Clear, rect);
    card.render_with(frame, rect, Paragraph::new(lines));
}

fn stock_header(item: &Item, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            item.item_name.clone(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            format!("In stock: {} {}", item.qty, item.unit),
            Style::default().fg(theme.text_muted),
        ))
        .alignment(Alignment::Center),
    ]
}

fn delete_body(item: &Item, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from("Remove this item from the store?").alignment(Alignment::Center),
        Line::from(Span::styled(
            format!("\"{}\"", item.item_name),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            "History stays in the transaction log.",
            Style::default().fg(theme.negative),
        ))
        .alignment(Alignment::Center),
    ]
}

fn form_lines(modal: &ModalController, theme: &Theme) -> Vec<Line<'static>> {
    let state = modal.state();
    let Some(draft) = state.draft() else {
        return Vec::new();
    };
    let focused = modal.focused_field();

    state
        .fields()
        .iter()
        .map(|field| {
            let is_focused = focused == Some(*field);
            let marker = if is_focused { "›" } else { " " };
            let label_style = if is_focused {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_muted)
            };

            let mut spans = vec![
                Span::styled(format!("{marker} "), Style::default().fg(theme.accent)),
                Span::styled(format!("{:<16}", label(*field, state)), label_style),
                Span::styled(
                    draft.field(*field).to_string(),
                    Style::default().fg(theme.text),
                ),
            ];
            if is_focused && !modal.is_submitting() {
                spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
            }
            Line::from(spans)
        })
        .collect()
}

fn label(field: Field, state: &ModalState) -> String {
    if state.required().contains(&field) {
        format!("{}*", field.label())
    } else {
        field.label().to_string()
    }
}
