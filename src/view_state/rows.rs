//! Row view model: item to display cells.

use crate::model::{Item, ItemKey};
use crate::state::AppState;

/// The grid never shows fewer rows than this; missing rows are placeholders.
pub const MIN_ROWS: usize = 10;

/// Glyph state for an image slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageGlyph {
    /// URL present and not known to have failed.
    Image,
    /// URL absent, blank, or failed to load.
    Placeholder,
}

/// One outbound link affordance in a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCell {
    pub title: String,
    pub url: String,
}

/// Display cells for one data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCells {
    pub key: ItemKey,
    pub logo: ImageGlyph,
    pub collection: String,
    pub token_image: ImageGlyph,
    pub token: String,
    /// Target of the token label; first link template, if any.
    pub token_link: Option<String>,
    pub links: Vec<LinkCell>,
    /// `Some(checked)` when batch selection is enabled.
    pub checkbox: Option<bool>,
    /// Whether the send affordance is present.
    pub send: bool,
    pub highlighted: bool,
}

/// A grid row: data or padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSlot {
    Data(RowCells),
    Placeholder,
}

impl RowSlot {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, RowSlot::Placeholder)
    }
}

/// Build cells for one item.
pub fn row_cells(state: &AppState, item: &Item, highlighted: bool, granted: bool) -> RowCells {
    let key = item.key();
    let links: Vec<LinkCell> = state
        .links
        .for_chain(state.chain_id)
        .iter()
        .map(|t| LinkCell {
            title: t.title().to_string(),
            url: t.url_for(item, state.chain_id),
        })
        .collect();
    let glyph = |url: Option<&str>| {
        if state.image_available(url) {
            ImageGlyph::Image
        } else {
            ImageGlyph::Placeholder
        }
    };

    RowCells {
        logo: glyph(item.logo_uri()),
        collection: item.collection_label().to_string(),
        token_image: glyph(item.preview_image()),
        token: item.token_label(),
        token_link: links.first().map(|l| l.url.clone()),
        links,
        checkbox: state
            .options
            .enable_batch_select
            .then(|| state.selection.contains(&key)),
        send: granted,
        highlighted,
        key,
    }
}

/// Every grid row for the current state, padded to [`MIN_ROWS`].
pub fn grid_rows(state: &AppState) -> Vec<RowSlot> {
    let granted = state.is_granted();
    let highlight = state.highlight();
    let mut rows: Vec<RowSlot> = state
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, item)| RowSlot::Data(row_cells(state, item, i == highlight, granted)))
        .collect();
    pad_rows(&mut rows, MIN_ROWS);
    rows
}

/// Append placeholders until `rows` holds at least `min` entries.
pub fn pad_rows(rows: &mut Vec<RowSlot>, min: usize) {
    while rows.len() < min {
        rows.push(RowSlot::Placeholder);
    }
}
