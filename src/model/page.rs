//! One response from a paged source.

use super::identifiers::Cursor;
use super::item::Item;

/// A page of items plus the cursor for the following request.
///
/// `next == None` means no further pages exist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    items: Vec<Item>,
    next: Option<Cursor>,
}

impl Page {
    /// Creates a last page (no continuation cursor).
    pub fn new(items: Vec<Item>) -> Self {
        Self { items, next: None }
    }

    /// Sets the continuation cursor.
    pub fn with_next(mut self, next: Option<Cursor>) -> Self {
        self.next = next;
        self
    }

    /// Items in this page, in source order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Consumes the page and returns its parts.
    pub fn into_parts(self) -> (Vec<Item>, Option<Cursor>) {
        (self.items, self.next)
    }

    /// Continuation cursor, if more pages are available.
    pub fn next(&self) -> Option<&Cursor> {
        self.next.as_ref()
    }

    /// Returns `true` if there are more pages available.
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_page_has_no_more() {
        let page = Page::new(vec![]);
        assert!(!page.has_more());
        assert!(page.is_empty());
    }

    #[test]
    fn page_with_cursor_has_more() {
        let page = Page::new(vec![]).with_next(Cursor::new("abc"));
        assert!(page.has_more());
        assert_eq!(page.next().map(Cursor::as_str), Some("abc"));
    }

    #[test]
    fn empty_cursor_string_means_last_page() {
        let page = Page::new(vec![]).with_next(Cursor::new(""));
        assert!(!page.has_more());
    }
}
