//! Selection tracker keyed by item identity.

use crate::model::ItemKey;
use std::collections::HashSet;

/// Set of selected item keys.
///
/// Membership is by identity key only, never by position or value, so a
/// filter change that hides a selected item never drops it from the set.
/// Order of selection carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    keys: HashSet<ItemKey>,
}

impl SelectionTracker {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `key` if present, add it otherwise.
    pub fn toggle(&mut self, key: ItemKey) {
        if !self.keys.remove(&key) {
            self.keys.insert(key);
        }
    }

    /// Empty the set.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Replace the set with exactly `keys`.
    pub fn set_exactly(&mut self, keys: impl IntoIterator<Item = ItemKey>) {
        self.keys = keys.into_iter().collect();
    }

    pub fn contains(&self, key: &ItemKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over selected keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &ItemKey> {
        self.keys.iter()
    }

    /// Status line wording: "1 NFT selected" / "3 NFTs selected".
    pub fn summary(&self) -> String {
        let n = self.keys.len();
        format!("{} NFT{} selected", n, if n == 1 { "" } else { "s" })
    }
}
