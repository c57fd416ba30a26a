//! Client-side collection filter.
//!
//! Matches exactly the text the grid shows: the collection label (token name,
//! falling back to the symbol) and the token label (display name, falling
//! back to the symbol). Pure and order preserving.

use crate::model::Item;

/// Filter `items` by a case-insensitive substring of the shown labels.
///
/// An empty needle returns every item in the original order.
pub fn filter<'a, I>(items: I, needle: &str) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    let needle = needle.to_lowercase();
    items
        .into_iter()
        .filter(|item| matches(item, &needle))
        .collect()
}

/// Whether one item matches an already lowercased needle.
pub fn matches(item: &Item, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    if item.collection_label().to_lowercase().contains(needle_lower) {
        return true;
    }
    item.name()
        .unwrap_or(item.token_symbol())
        .to_lowercase()
        .contains(needle_lower)
}
