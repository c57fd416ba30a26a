//! Help overlay widget displaying keyboard shortcuts.
//!
//! Centered modal listing the shortcuts by category.
//! Triggered by '?', dismissed by 'Esc', '?' or 'q'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::layout::centered_rect;
use super::styles::{TableStyles, MUTED_TEXT, SECTION_HEADER};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Shortcut table: category, then (keys, description) pairs.
const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/↓ k/↑", "Move highlight"),
            ("Ctrl+d/PgDn", "Page down"),
            ("Ctrl+u/PgUp", "Page up"),
            ("g/Home G/End", "First / last row"),
        ],
    ),
    (
        "Selection",
        &[
            ("Space", "Toggle highlighted row"),
            ("a", "Select all shown rows"),
            ("x", "Deselect all"),
        ],
    ),
    (
        "Transfer",
        &[
            ("s", "Send selected"),
            ("Enter", "Send highlighted"),
            ("Tab", "Complete recipient from contacts"),
        ],
    ),
    (
        "Filter",
        &[
            ("/ Ctrl+f", "Filter by collection or name"),
            ("Esc", "Clear filter"),
        ],
    ),
    (
        "Loading",
        &[
            ("n", "Load more"),
            ("[ ]", "Previous / next page"),
            ("r", "Retry failed request"),
        ],
    ),
    (
        "Application",
        &[
            ("o", "Open link in browser"),
            ("?", "Toggle this help"),
            ("q Ctrl+c", "Quit"),
        ],
    ),
];

/// Width of the key column.
const KEY_COLUMN: usize = 16;

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, styles: &TableStyles) {
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, frame.area());
    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(styles))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(styles.accent),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };
    let hint = Paragraph::new(Span::styled(
        " Press Esc or ? to close ",
        MUTED_TEXT.add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

fn build_help_content(styles: &TableStyles) -> Vec<Line<'static>> {
    let key_style = styles.send;
    let mut lines = Vec::new();
    for (i, (category, entries)) in SHORTCUTS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*category, SECTION_HEADER)));
        for (keys, desc) in entries.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<KEY_COLUMN$}"), key_style),
                Span::raw(*desc),
            ]));
        }
    }
    lines
}

// ===== Tests =====
