//! NFT holding as displayed in the grid.

use super::identifiers::{ContractAddress, ItemKey, TokenId};
use serde::Serialize;

/// Number of token id characters shown when an item has no name.
pub const TOKEN_ID_PREFIX_LEN: usize = 20;

/// One NFT holding.
///
/// Built by the parser from gateway responses. Optional text fields are
/// normalized so that an empty string is stored as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    address: ContractAddress,
    id: TokenId,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    token_name: String,
    token_symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    logo_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Item {
    /// Create an item with only the required identity and collection fields.
    pub fn new(
        address: ContractAddress,
        id: TokenId,
        token_name: impl Into<String>,
        token_symbol: impl Into<String>,
    ) -> Self {
        Self {
            address,
            id,
            name: None,
            token_name: token_name.into(),
            token_symbol: token_symbol.into(),
            logo_uri: None,
            image_uri: None,
            description: None,
        }
    }

    /// Set the human-readable token name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = non_empty(name.into());
        self
    }

    /// Set the collection logo URL.
    pub fn with_logo_uri(mut self, uri: impl Into<String>) -> Self {
        self.logo_uri = non_empty(uri.into());
        self
    }

    /// Set the token preview image URL.
    pub fn with_image_uri(mut self, uri: impl Into<String>) -> Self {
        self.image_uri = non_empty(uri.into());
        self
    }

    /// Set the token description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(description.into());
        self
    }

    /// Identity key (contract address + token id).
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.address.clone(), self.id.clone())
    }

    pub fn address(&self) -> &ContractAddress {
        &self.address
    }

    pub fn id(&self) -> &TokenId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn token_name(&self) -> &str {
        &self.token_name
    }

    pub fn token_symbol(&self) -> &str {
        &self.token_symbol
    }

    pub fn logo_uri(&self) -> Option<&str> {
        self.logo_uri.as_deref()
    }

    pub fn image_uri(&self) -> Option<&str> {
        self.image_uri.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Collection label: token name, falling back to the symbol.
    pub fn collection_label(&self) -> &str {
        if self.token_name.is_empty() {
            &self.token_symbol
        } else {
            &self.token_name
        }
    }

    /// Token label: display name, else `"{symbol} #{id-prefix}"`.
    pub fn token_label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!(
                "{} #{}",
                self.token_symbol,
                self.id.prefix(TOKEN_ID_PREFIX_LEN)
            ),
        }
    }

    /// Image shown next to the token label: preview image, else the logo.
    pub fn preview_image(&self) -> Option<&str> {
        self.image_uri.as_deref().or(self.logo_uri.as_deref())
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
