//! Preview side panel for the highlighted row.
//!
//! Descriptions are markdown and go through `tui_markdown`; attributes are
//! listed below as `name: value`.

use super::styles::{TableStyles, MUTED_TEXT};
use crate::model::{Item, ItemPreview, PreviewState};
use crate::state::AppState;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_markdown::from_str;

/// Render the panel for whatever row is highlighted.
pub fn render_preview_panel(frame: &mut Frame, area: Rect, state: &AppState, styles: &TableStyles) {
    let block = Block::default().borders(Borders::ALL).title(" Preview ");
    let lines = match state.highlighted_item() {
        None => vec![Line::from(Span::styled("Nothing highlighted", MUTED_TEXT))],
        Some(item) => preview_lines(item, state.preview(&item.key()), styles),
    };
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

/// Lines for one item in the given preview state.
pub fn preview_lines(
    item: &Item,
    preview: Option<&PreviewState>,
    styles: &TableStyles,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(item.token_label(), styles.header)),
        Line::from(Span::styled(item.collection_label().to_string(), MUTED_TEXT)),
        Line::default(),
    ];

    match preview {
        None | Some(PreviewState::Loading) => {
            lines.push(Line::from(Span::styled("Loading preview…", MUTED_TEXT)));
        }
        Some(PreviewState::Failed(reason)) => {
            lines.push(Line::from(Span::styled(
                format!("Preview unavailable: {reason}"),
                styles.error,
            )));
        }
        Some(PreviewState::Ready(preview)) => lines.extend(ready_lines(item, preview, styles)),
    }
    lines
}

fn ready_lines(item: &Item, preview: &ItemPreview, styles: &TableStyles) -> Vec<Line<'static>> {
    let description = preview.description.as_deref().or(item.description());
    let mut lines = match description {
        Some(text) => render_markdown(text, styles.row),
        None if preview.attributes.is_empty() => {
            vec![Line::from(Span::styled("No metadata", MUTED_TEXT))]
        }
        None => Vec::new(),
    };

    if !preview.attributes.is_empty() {
        lines.push(Line::default());
        for attribute in &preview.attributes {
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", attribute.name), styles.accent),
                Span::raw(attribute.value.clone()),
            ]));
        }
    }
    lines
}

/// Markdown to owned lines with `base` under the markdown styling.
fn render_markdown(text: &str, base: Style) -> Vec<Line<'static>> {
    from_str(text)
        .lines
        .into_iter()
        .map(|line| {
            Line::from(
                line.spans
                    .into_iter()
                    .map(|span| Span::styled(span.content.into_owned(), base.patch(span.style)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}
