//! Page accumulator.
//!
//! Gathers pages from a paged source one request at a time. Requests are
//! described by [`FetchTicket`]s; the shell performs the fetch and hands the
//! result back through [`PageAccumulator::apply`]. Accumulated pages are
//! append-only for the lifetime of the accumulator.

use crate::model::{Cursor, FetchError, Item, ItemKey, Page};
use std::collections::HashSet;
use tracing::debug;

/// How fetched pages are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccumulationMode {
    /// Infinite scroll: every accumulated item is visible.
    #[default]
    Flatten,
    /// Classic pagination: only the current page is visible.
    Paginate,
}

/// One page request.
///
/// The generation identifies the request; a result carrying any other
/// generation than the one in flight is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub cursor: Option<Cursor>,
}

/// What the grid area should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing accumulated yet and no error.
    Loading,
    /// The source has no items at all.
    Empty,
    /// Nothing accumulated and the last request failed.
    Failed(FetchError),
    /// At least one page is available.
    Ready,
}

/// Append-only set of fetched pages.
#[derive(Debug, Clone, Default)]
pub struct PageAccumulator {
    mode: AccumulationMode,
    pages: Vec<Vec<Item>>,
    /// Identity keys of every stored item.
    keys: HashSet<ItemKey>,
    next: Option<Cursor>,
    in_flight: Option<u64>,
    generation: u64,
    last_error: Option<FetchError>,
    /// None until the first page is stored (index -1).
    current_page: Option<usize>,
}

impl PageAccumulator {
    pub fn new(mode: AccumulationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> AccumulationMode {
        self.mode
    }

    /// Issue a ticket for the next page.
    ///
    /// Returns `None` while a request is in flight or once the last page
    /// has been reached.
    pub fn begin_request(&mut self) -> Option<FetchTicket> {
        if !self.can_request() {
            return None;
        }
        self.generation += 1;
        self.in_flight = Some(self.generation);
        let ticket = FetchTicket {
            generation: self.generation,
            cursor: self.next.clone(),
        };
        debug!(
            generation = ticket.generation,
            cursor = ?ticket.cursor.as_ref().map(Cursor::as_str),
            "Page request issued"
        );
        Some(ticket)
    }

    /// Re-issue the request that last failed, with the same cursor.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.last_error.is_none() {
            return None;
        }
        self.begin_request()
    }

    /// Apply the outcome of a request.
    ///
    /// Returns `false` if the ticket is stale and the result was ignored.
    pub fn apply(&mut self, ticket: &FetchTicket, result: Result<Page, FetchError>) -> bool {
        if self.in_flight != Some(ticket.generation) {
            debug!(
                generation = ticket.generation,
                in_flight = ?self.in_flight,
                "Ignoring stale page response"
            );
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                let (items, next) = page.into_parts();
                debug!(items = items.len(), has_more = next.is_some(), "Page stored");
                self.keys.extend(items.iter().map(Item::key));
                self.pages.push(items);
                self.next = next;
                self.last_error = None;
                if self.mode == AccumulationMode::Paginate || self.current_page.is_none() {
                    self.current_page = Some(self.pages.len() - 1);
                }
            }
            Err(err) => {
                debug!(error = %err, "Page request failed");
                self.last_error = Some(err);
            }
        }
        true
    }

    /// Whether a new request may be issued right now.
    pub fn can_request(&self) -> bool {
        self.in_flight.is_none() && self.has_more()
    }

    /// Whether the source may hold further pages.
    pub fn has_more(&self) -> bool {
        self.pages.is_empty() || self.next.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn status(&self) -> LoadStatus {
        if self.total_items() > 0 {
            return LoadStatus::Ready;
        }
        if let Some(err) = &self.last_error {
            if !self.is_loading() {
                return LoadStatus::Failed(err.clone());
            }
        }
        if self.is_loading() || self.pages.is_empty() {
            LoadStatus::Loading
        } else if self.next.is_none() {
            LoadStatus::Empty
        } else {
            LoadStatus::Ready
        }
    }

    /// Number of stored pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Index of the current page, `None` before the first page.
    pub fn current_page(&self) -> Option<usize> {
        self.current_page
    }

    /// Move to a page by index.
    ///
    /// Indices past the last stored page request the next page instead; the
    /// new page becomes current when it arrives.
    pub fn go_to_page(&mut self, index: usize) -> Option<FetchTicket> {
        if index < self.pages.len() {
            self.current_page = Some(index);
            None
        } else {
            self.begin_request()
        }
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        let target = self.current_page.map_or(0, |i| i + 1);
        self.go_to_page(target)
    }

    pub fn prev_page(&mut self) {
        if let Some(index) = self.current_page {
            self.current_page = Some(index.saturating_sub(1));
        }
    }

    /// Items the grid shows before filtering.
    pub fn visible_items(&self) -> Vec<&Item> {
        match self.mode {
            AccumulationMode::Flatten => self.all_items().collect(),
            AccumulationMode::Paginate => self
                .current_page
                .and_then(|i| self.pages.get(i))
                .map(|page| page.iter().collect())
                .unwrap_or_default(),
        }
    }

    /// Every accumulated item in fetch order.
    pub fn all_items(&self) -> impl Iterator<Item = &Item> {
        self.pages.iter().flatten()
    }

    /// Whether an item with `key` has been accumulated.
    pub fn contains(&self, key: &ItemKey) -> bool {
        self.keys.contains(key)
    }

    pub fn total_items(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }
}
