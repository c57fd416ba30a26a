//! Application state composition.
//!
//! AppState exclusively owns the accumulated set and the selection. Widgets
//! read it; handlers mutate it and return effects for the shell to perform.

use crate::model::{
    AddressBook, Authorization, FetchError, Item, ItemKey, ItemPreview, NetworkLinks, Page,
    PreviewState, TransferError,
};
use crate::state::accumulator::{AccumulationMode, FetchTicket, PageAccumulator};
use crate::state::filter::filter;
use crate::state::filter_input::FilterInput;
use crate::state::selection::SelectionTracker;
use crate::state::transfer::{TransferIntent, TransferState};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, warn};

/// Rows assumed visible before the first render reports the real height.
const DEFAULT_VIEWPORT_ROWS: usize = 10;

/// Feature switches for one view instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub enable_pagination: bool,
    pub enable_batch_select: bool,
    pub enable_preview: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            enable_pagination: false,
            enable_batch_select: true,
            enable_preview: false,
        }
    }
}

/// Side effects requested by handlers and performed by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one page for the accumulator.
    Fetch(FetchTicket),
    /// Hand a confirmed intent to the transaction pipeline.
    Submit(TransferIntent),
    /// Open a URL in the system browser.
    OpenLink(String),
    Quit,
}

/// Main application state.
pub struct AppState {
    pub accumulator: PageAccumulator,
    pub selection: SelectionTracker,
    pub filter: FilterInput,
    pub transfer: TransferState,
    pub options: ViewOptions,
    pub address_book: AddressBook,
    pub links: NetworkLinks,
    pub chain_id: u64,
    /// Wallet the items belong to; shown in the transfer modal header.
    pub owner_label: String,
    pub help_visible: bool,
    /// One-line notice shown in the status bar.
    pub status_message: Option<String>,
    authorization: Box<dyn Authorization + Send>,
    highlight: usize,
    scroll_offset: usize,
    viewport_rows: usize,
    previews: HashMap<ItemKey, PreviewState>,
    failed_images: HashSet<String>,
    /// Image URLs already handed to the image checker.
    checked_images: HashSet<String>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("options", &self.options)
            .field("items", &self.accumulator.total_items())
            .field("selected", &self.selection.len())
            .field("filter", &self.filter)
            .field("transfer_open", &self.transfer.is_open())
            .field("highlight", &self.highlight)
            .finish()
    }
}

impl AppState {
    pub fn new(options: ViewOptions, authorization: Box<dyn Authorization + Send>) -> Self {
        let mode = if options.enable_pagination {
            AccumulationMode::Paginate
        } else {
            AccumulationMode::Flatten
        };
        Self {
            accumulator: PageAccumulator::new(mode),
            selection: SelectionTracker::new(),
            filter: FilterInput::default(),
            transfer: TransferState::default(),
            options,
            address_book: AddressBook::new(),
            links: NetworkLinks::default(),
            chain_id: 1,
            owner_label: String::new(),
            help_visible: false,
            status_message: None,
            authorization,
            highlight: 0,
            scroll_offset: 0,
            viewport_rows: DEFAULT_VIEWPORT_ROWS,
            previews: HashMap::new(),
            failed_images: HashSet::new(),
            checked_images: HashSet::new(),
        }
    }

    pub fn with_address_book(mut self, book: AddressBook) -> Self {
        self.address_book = book;
        self
    }

    pub fn with_links(mut self, links: NetworkLinks, chain_id: u64) -> Self {
        self.links = links;
        self.chain_id = chain_id;
        self
    }

    pub fn with_owner_label(mut self, label: impl Into<String>) -> Self {
        self.owner_label = label.into();
        self
    }

    pub fn with_filter(mut self, needle: impl Into<String>) -> Self {
        self.filter = FilterInput::with_needle(needle);
        self
    }

    /// Re-evaluated on every call; never cached.
    pub fn is_granted(&self) -> bool {
        self.authorization.is_granted()
    }

    // ===== Rows =====

    /// Rows the grid shows: the accumulator's visible items, filtered.
    pub fn rows(&self) -> Vec<&Item> {
        filter(self.accumulator.visible_items(), self.filter.needle())
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }

    pub fn highlighted_item(&self) -> Option<&Item> {
        self.rows().get(self.highlight).copied()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    /// Record how many data rows fit on screen.
    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
        self.adjust_scroll();
    }

    /// Move the highlight by `delta` rows, clamped to the row count.
    ///
    /// Returns `true` when the highlight ends on the last row.
    pub fn move_highlight(&mut self, delta: isize) -> bool {
        let count = self.rows().len();
        if count == 0 {
            self.highlight = 0;
            self.scroll_offset = 0;
            return false;
        }
        let target = self.highlight as isize + delta;
        self.highlight = target.clamp(0, count as isize - 1) as usize;
        self.adjust_scroll();
        self.highlight + 1 == count
    }

    /// Put the highlight on row `index` if it exists.
    pub fn set_highlight(&mut self, index: usize) {
        if index < self.rows().len() {
            self.highlight = index;
            self.adjust_scroll();
        }
    }

    /// Keep the highlight in range after the row set changed.
    pub fn clamp_highlight(&mut self) {
        let count = self.rows().len();
        self.highlight = self.highlight.min(count.saturating_sub(1));
        self.adjust_scroll();
    }

    fn adjust_scroll(&mut self) {
        if self.highlight < self.scroll_offset {
            self.scroll_offset = self.highlight;
        } else if self.highlight >= self.scroll_offset + self.viewport_rows {
            self.scroll_offset = self.highlight + 1 - self.viewport_rows;
        }
    }

    // ===== Paging =====

    /// Store the outcome of a page request.
    pub fn apply_page(&mut self, ticket: &FetchTicket, result: Result<Page, FetchError>) {
        if let Err(err) = &result {
            warn!(error = %err, cursor = ?ticket.cursor, "Failed to load page");
        }
        let stored = result.is_ok();
        if self.accumulator.apply(ticket, result) && stored && self.options.enable_pagination {
            self.highlight = 0;
            self.scroll_offset = 0;
        }
        self.clamp_highlight();
    }

    // ===== Selection =====

    /// Toggle selection of `key`. Keys outside the accumulated set are ignored.
    pub fn toggle_selection(&mut self, key: ItemKey) {
        if !self.options.enable_batch_select {
            return;
        }
        if self.accumulator.contains(&key) {
            self.selection.toggle(key);
        } else {
            debug!(key = %key, "Ignoring selection of unknown item");
        }
    }

    pub fn toggle_highlighted(&mut self) {
        if let Some(key) = self.highlighted_item().map(Item::key) {
            self.toggle_selection(key);
        }
    }

    /// Replace the selection with every row currently shown.
    pub fn select_all_rows(&mut self) {
        if !self.options.enable_batch_select {
            return;
        }
        let keys: Vec<ItemKey> = self.rows().into_iter().map(Item::key).collect();
        self.selection.set_exactly(keys);
    }

    /// Selected items in accumulated order, each key once.
    pub fn selected_items(&self) -> Vec<Item> {
        let mut seen = HashSet::new();
        self.accumulator
            .all_items()
            .filter(|item| {
                let key = item.key();
                self.selection.contains(&key) && seen.insert(key)
            })
            .cloned()
            .collect()
    }

    // ===== Transfer =====

    /// Open the transfer modal with the selection.
    pub fn send_selected(&mut self) -> Result<(), TransferError> {
        let items = self.selected_items();
        self.transfer.open_batch(items, self.authorization.as_ref())
    }

    /// Open the transfer modal with one item, ignoring the selection.
    pub fn send_item(&mut self, item: Item) -> Result<(), TransferError> {
        self.transfer.open_single(item, self.authorization.as_ref())
    }

    /// Outcome of handing an intent to the pipeline.
    pub fn finish_submit(&mut self, intent: &TransferIntent, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.selection.clear();
                self.status_message = Some(format!(
                    "Transfer of {} NFT{} to {} submitted",
                    intent.item_count(),
                    if intent.item_count() == 1 { "" } else { "s" },
                    intent.recipient()
                ));
            }
            Err(reason) => {
                self.status_message = Some(format!("Transfer failed: {reason}"));
            }
        }
    }

    // ===== Links =====

    /// URL of the first link template for `item`, if any.
    pub fn primary_link(&self, item: &Item) -> Option<String> {
        self.links
            .for_chain(self.chain_id)
            .first()
            .map(|t| t.url_for(item, self.chain_id))
    }

    // ===== Preview =====

    /// Item whose preview should be fetched now, marking it as loading.
    pub fn take_preview_request(&mut self) -> Option<Item> {
        if !self.options.enable_preview {
            return None;
        }
        let item = self.highlighted_item()?.clone();
        let key = item.key();
        if self.previews.contains_key(&key) {
            return None;
        }
        self.previews.insert(key, PreviewState::Loading);
        Some(item)
    }

    pub fn apply_preview(&mut self, key: ItemKey, result: Result<ItemPreview, FetchError>) {
        let state = match result {
            Ok(preview) => PreviewState::Ready(preview),
            Err(err) => {
                debug!(key = %key, error = %err, "Preview unavailable");
                PreviewState::Failed(err.to_string())
            }
        };
        self.previews.insert(key, state);
    }

    pub fn preview(&self, key: &ItemKey) -> Option<&PreviewState> {
        self.previews.get(key)
    }

    // ===== Images =====

    pub fn mark_image_failed(&mut self, url: String) {
        self.failed_images.insert(url);
    }

    /// Image URLs of the rows in view that have not been checked yet.
    ///
    /// Each URL is returned once per session.
    pub fn take_image_checks(&mut self) -> Vec<String> {
        let urls: Vec<String> = self
            .rows()
            .into_iter()
            .skip(self.scroll_offset)
            .take(self.viewport_rows)
            .flat_map(|item| [item.logo_uri(), item.image_uri()])
            .flatten()
            .filter(|url| !url.trim().is_empty())
            .map(str::to_string)
            .collect();
        urls.into_iter()
            .filter(|url| self.checked_images.insert(url.clone()))
            .collect()
    }

    pub fn apply_image_check(&mut self, url: String, reachable: bool) {
        if !reachable {
            debug!(url = %url, "Image failed to load");
            self.mark_image_failed(url);
        }
    }

    /// Whether `url` is usable; absent, blank, or failed URLs are not.
    pub fn image_available(&self, url: Option<&str>) -> bool {
        match url {
            Some(url) if !url.trim().is_empty() => !self.failed_images.contains(url),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
