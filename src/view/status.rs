//! Selection bar, load control and filter input.

use super::styles::TableStyles;
use crate::state::{AccumulationMode, AppState, FilterInput};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// Render the one-line status bar.
///
/// Left: the selection summary with its actions, or the last notice.
/// Right: the load control for the current accumulation mode.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, styles: &TableStyles) {
    let mut spans = Vec::new();

    if state.options.enable_batch_select && !state.selection.is_empty() {
        spans.push(Span::styled(state.selection.summary(), styles.selected));
        spans.push(Span::raw("  "));
        spans.push(Span::styled("[Deselect all]", styles.placeholder));
        spans.push(Span::raw(" "));
        if state.is_granted() {
            spans.push(Span::styled("[Send]", styles.send));
        } else {
            spans.push(Span::styled("[Read only]", styles.placeholder));
        }
    } else if let Some(message) = &state.status_message {
        spans.push(Span::styled(message.clone(), styles.accent));
    }

    spans.push(Span::raw("  "));
    spans.extend(load_control(state, styles));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Spans describing whether and how more items can be loaded.
pub fn load_control(state: &AppState, styles: &TableStyles) -> Vec<Span<'static>> {
    let acc = &state.accumulator;
    if acc.total_items() == 0 {
        return Vec::new();
    }
    if acc.is_loading() {
        return vec![Span::styled("Loading…", styles.placeholder)];
    }
    if let Some(err) = acc.last_error() {
        return vec![
            Span::styled(format!("Failed to load NFTs: {err}"), styles.error),
            Span::styled(" (r to retry)", styles.placeholder),
        ];
    }
    match acc.mode() {
        AccumulationMode::Flatten if acc.has_more() => {
            vec![Span::styled("n load more", styles.placeholder)]
        }
        AccumulationMode::Flatten => Vec::new(),
        AccumulationMode::Paginate => {
            let index = acc.current_page().unwrap_or(0);
            let prev = if index > 0 { "[ prev" } else { "[     " };
            let next = if index + 1 < acc.page_count() || acc.has_more() {
                "next ]"
            } else {
                "     ]"
            };
            vec![Span::styled(
                format!("{prev}  page {}  {next}", index + 1),
                styles.placeholder,
            )]
        }
    }
}

/// Filter input widget: the editable needle with a block cursor, or the
/// applied needle read-only.
pub struct FilterInputWidget<'a> {
    input: &'a FilterInput,
    styles: &'a TableStyles,
}

impl<'a> FilterInputWidget<'a> {
    pub fn new(input: &'a FilterInput, styles: &'a TableStyles) -> Self {
        Self { input, styles }
    }
}

impl Widget for FilterInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.input {
            FilterInput::Editing { needle, cursor } => {
                let before: String = needle.chars().take(*cursor).collect();
                let mut after = needle.chars().skip(*cursor);
                let at_cursor = after.next().map(String::from).unwrap_or_else(|| " ".to_string());
                let rest: String = after.collect();

                let line = Line::from(vec![
                    Span::raw(before),
                    Span::styled(at_cursor, Style::default().add_modifier(Modifier::REVERSED)),
                    Span::raw(rest),
                ]);
                Paragraph::new(line)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(" Filter ")
                            .border_style(self.styles.accent),
                    )
                    .render(area, buf);
            }
            FilterInput::Applied { needle } => {
                Paragraph::new(Line::from(needle.as_str()))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(" Filter (Esc clears) ")
                            .border_style(self.styles.placeholder),
                    )
                    .render(area, buf);
            }
            FilterInput::Idle => {}
        }
    }
}

/// Render the filter input into `area`.
pub fn render_filter_input(frame: &mut Frame, area: Rect, state: &AppState, styles: &TableStyles) {
    frame.render_widget(FilterInputWidget::new(&state.filter, styles), area);
}
