//! Gateway JSON parser for collectible pages.
//!
//! This module provides pure parsing functions for converting gateway
//! responses into validated [`Page`] values. Malformed items are reported
//! individually and skipped; only an unreadable page body fails the request.

use crate::model::{ContractAddress, Cursor, FetchError, Item, Page, ParseError, TokenId};
use serde::Deserialize;

/// Raw JSON structure for one page of collectibles.
///
/// `cursor` is only present in fixture files, where it names the request the
/// page answers; the gateway itself never sends it.
#[derive(Debug, Deserialize)]
pub(crate) struct RawPage {
    #[serde(default)]
    pub(crate) cursor: Option<String>,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    results: Vec<RawCollectible>,
}

/// Raw JSON structure for one collectible.
///
/// Everything is optional here so that one bad item cannot fail the page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCollectible {
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    id: Option<RawTokenId>,
    #[serde(default)]
    token_name: Option<String>,
    #[serde(default)]
    token_symbol: Option<String>,
    #[serde(default)]
    logo_uri: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image_uri: Option<String>,
}

/// Token ids normally arrive as strings; small ids sometimes as numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTokenId {
    Text(String),
    Number(serde_json::Number),
}

impl RawTokenId {
    fn into_string(self) -> String {
        match self {
            RawTokenId::Text(s) => s,
            RawTokenId::Number(n) => n.to_string(),
        }
    }
}

/// Parse a gateway response body into a page.
///
/// # Returns
///
/// Tuple of (page of successfully parsed items, per-item parse errors).
///
/// # Errors
///
/// Returns `FetchError::InvalidResponse` if the body is not a page object.
pub fn parse_page(body: &str) -> Result<(Page, Vec<ParseError>), FetchError> {
    let raw: RawPage = serde_json::from_str(body).map_err(|e| FetchError::InvalidResponse {
        reason: e.to_string(),
    })?;
    Ok(convert_page(raw))
}

/// Convert an already deserialized page, skipping malformed items.
pub(crate) fn convert_page(raw: RawPage) -> (Page, Vec<ParseError>) {
    let mut items = Vec::with_capacity(raw.results.len());
    let mut errors = Vec::new();

    for (index, raw_item) in raw.results.into_iter().enumerate() {
        match convert_item(index, raw_item) {
            Ok(item) => items.push(item),
            Err(err) => errors.push(err),
        }
    }

    let next = raw.next.and_then(Cursor::new);
    (Page::new(items).with_next(next), errors)
}

fn convert_item(index: usize, raw: RawCollectible) -> Result<Item, ParseError> {
    let address = raw
        .address
        .and_then(|a| ContractAddress::new(a).ok())
        .ok_or(ParseError::MissingField {
            index,
            field: "address",
        })?;

    let id = raw
        .id
        .map(RawTokenId::into_string)
        .and_then(|id| TokenId::new(id).ok())
        .ok_or(ParseError::MissingField { index, field: "id" })?;

    let mut item = Item::new(
        address,
        id,
        raw.token_name.unwrap_or_default(),
        raw.token_symbol.unwrap_or_default(),
    );
    if let Some(name) = raw.name {
        item = item.with_name(name);
    }
    if let Some(logo) = raw.logo_uri {
        item = item.with_logo_uri(logo);
    }
    if let Some(image) = raw.image_uri {
        item = item.with_image_uri(image);
    }
    if let Some(description) = raw.description {
        item = item.with_description(description);
    }
    Ok(item)
}
