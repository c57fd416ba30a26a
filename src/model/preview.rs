//! Per-item metadata preview.

use serde::Deserialize;

/// One trait/attribute pair from the item metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attribute {
    #[serde(alias = "trait_type", alias = "traitType")]
    pub name: String,
    pub value: String,
}

/// Metadata shown in the preview panel for the highlighted row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPreview {
    /// Markdown description.
    pub description: Option<String>,
    pub attributes: Vec<Attribute>,
}

impl ItemPreview {
    pub fn is_blank(&self) -> bool {
        self.description.is_none() && self.attributes.is_empty()
    }
}

/// Lifecycle of one item's preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    Loading,
    Ready(ItemPreview),
    Failed(String),
}
