//! Transfer intent modal.
//!
//! Centered overlay listing the items about to be sent and the recipient
//! field. A recipient that matches an address-book contact is shown as a
//! resolved block instead of raw text.

use super::constants::{TRANSFER_POPUP_HEIGHT_PERCENT, TRANSFER_POPUP_WIDTH_PERCENT};
use super::layout::centered_rect;
use super::styles::{TableStyles, MUTED_TEXT};
use crate::state::transfer::{item_detail, item_title};
use crate::state::AppState;
use ratatui::{
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Contacts listed under the recipient field while typing.
const MAX_SUGGESTIONS: usize = 3;

/// Render the modal if a draft is open.
pub fn render_transfer_modal(frame: &mut Frame, state: &AppState, styles: &TableStyles) {
    let Some(draft) = state.transfer.draft() else {
        return;
    };
    let area = centered_rect(
        TRANSFER_POPUP_WIDTH_PERCENT,
        TRANSFER_POPUP_HEIGHT_PERCENT,
        frame.area(),
    );
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from(vec![
        Span::styled(draft.header(), styles.header),
        Span::raw(" "),
        Span::styled(state.owner_label.clone(), styles.accent),
    ])];
    lines.push(Line::default());

    // Border, header, blank, recipient block, error, hint.
    let reserved = 2 + 2 + 6;
    let room = (area.height as usize).saturating_sub(reserved) / 2;
    let shown = draft.items().len().min(room.max(1));
    for item in &draft.items()[..shown] {
        lines.push(Line::from(Span::styled(
            item_title(item),
            styles.row.add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(item_detail(item), MUTED_TEXT)));
    }
    let hidden = draft.items().len() - shown;
    if hidden > 0 {
        lines.push(Line::from(Span::styled(
            format!("…and {hidden} more"),
            MUTED_TEXT,
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Recipient", styles.header)));

    match draft.resolved(&state.address_book) {
        Some(contact) => {
            lines.push(Line::from(Span::styled(
                format!("◆ {}", contact.name()),
                styles.accent.add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!("  {}", contact.address()),
                MUTED_TEXT,
            )));
        }
        None => {
            lines.push(Line::from(vec![
                Span::raw("> "),
                Span::raw(draft.recipient().to_string()),
                Span::styled("▏", styles.accent),
            ]));
            if !draft.recipient().is_empty() {
                for contact in state
                    .address_book
                    .suggest(draft.recipient())
                    .into_iter()
                    .take(MAX_SUGGESTIONS)
                {
                    lines.push(Line::from(Span::styled(
                        format!("  {} {}", contact.name(), contact.address()),
                        MUTED_TEXT,
                    )));
                }
            }
        }
    }

    if let Some(err) = draft.error() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(err.to_string(), styles.error)));
    }

    let modal = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Send NFTs ")
                .title_bottom(" Enter send · Tab complete · Esc cancel ")
                .borders(Borders::ALL)
                .border_style(styles.accent),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(modal, area);
}
