//! Optional per-item metadata preview.
//!
//! Previews are fetched lazily for the highlighted row, one request per item,
//! on a background worker. Without an API credential the capability is
//! [`DisabledPreview`] and nothing is ever requested.

use super::fetcher::spawn_worker;
use crate::model::{Attribute, FetchError, Item, ItemKey, ItemPreview};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::debug;
use url::Url;

const PREVIEW_TIMEOUT: Duration = Duration::from_secs(10);

/// Default marketplace metadata API.
pub const DEFAULT_PREVIEW_BASE_URL: &str = "https://api.opensea.io";

/// Source of item previews.
pub trait PreviewProvider: Send {
    /// Whether previews can be fetched at all.
    fn is_enabled(&self) -> bool;

    /// Fetch the preview for one item.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the metadata cannot be retrieved.
    fn preview(&mut self, item: &Item) -> Result<ItemPreview, FetchError>;
}

/// Capability used when no API credential is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPreview;

impl PreviewProvider for DisabledPreview {
    fn is_enabled(&self) -> bool {
        false
    }

    fn preview(&mut self, _item: &Item) -> Result<ItemPreview, FetchError> {
        Ok(ItemPreview::default())
    }
}

/// Marketplace metadata API client.
#[derive(Debug, Clone)]
pub struct MarketplacePreview {
    client: Client,
    base_url: Url,
    api_key: String,
    chain_id: u64,
}

#[derive(Debug, Deserialize)]
struct RawNftResponse {
    nft: RawNft,
}

#[derive(Debug, Deserialize)]
struct RawNft {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    traits: Vec<RawTrait>,
}

#[derive(Debug, Deserialize)]
struct RawTrait {
    #[serde(default)]
    trait_type: String,
    #[serde(default)]
    value: serde_json::Value,
}

impl MarketplacePreview {
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` for a malformed base URL.
    pub fn new(base_url: &str, api_key: impl Into<String>, chain_id: u64) -> Result<Self, FetchError> {
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
        let client = Client::builder().timeout(PREVIEW_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            chain_id,
        })
    }

    fn item_url(&self, item: &Item) -> Result<Url, FetchError> {
        let chain = chain_slug(self.chain_id).ok_or_else(|| FetchError::InvalidResponse {
            reason: format!("no preview support for chain {}", self.chain_id),
        })?;
        Ok(self.base_url.join(&format!(
            "api/v2/chain/{}/contract/{}/nfts/{}",
            chain,
            item.address(),
            item.id()
        ))?)
    }
}

impl PreviewProvider for MarketplacePreview {
    fn is_enabled(&self) -> bool {
        true
    }

    fn preview(&mut self, item: &Item) -> Result<ItemPreview, FetchError> {
        let url = self.item_url(item)?;
        let raw: RawNftResponse = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header("x-api-key", &self.api_key)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(convert_nft(raw.nft))
    }
}

fn convert_nft(raw: RawNft) -> ItemPreview {
    let attributes = raw
        .traits
        .into_iter()
        .filter(|t| !t.trait_type.is_empty())
        .map(|t| Attribute {
            name: t.trait_type,
            value: match t.value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            },
        })
        .collect();
    ItemPreview {
        description: raw.description.filter(|d| !d.trim().is_empty()),
        attributes,
    }
}

/// Marketplace chain identifier for an EVM chain id.
fn chain_slug(chain_id: u64) -> Option<&'static str> {
    match chain_id {
        1 => Some("ethereum"),
        5 => Some("goerli"),
        10 => Some("optimism"),
        137 => Some("matic"),
        8453 => Some("base"),
        42161 => Some("arbitrum"),
        11155111 => Some("sepolia"),
        _ => None,
    }
}

/// Result of one preview request.
#[derive(Debug)]
pub struct PreviewOutcome {
    pub key: ItemKey,
    pub result: Result<ItemPreview, FetchError>,
}

/// Runs a [`PreviewProvider`] on a background thread.
#[derive(Debug)]
pub struct PreviewFetcher {
    requests: Sender<Item>,
    outcomes: Receiver<PreviewOutcome>,
    _handle: JoinHandle<()>,
}

impl PreviewFetcher {
    /// # Errors
    ///
    /// Returns an I/O error if the thread cannot be spawned.
    pub fn spawn(mut provider: Box<dyn PreviewProvider>) -> std::io::Result<Self> {
        let (requests, outcomes, handle) = spawn_worker("nftdeck-preview", move |item: Item| {
            PreviewOutcome {
                key: item.key(),
                result: provider.preview(&item),
            }
        })?;
        Ok(Self {
            requests,
            outcomes,
            _handle: handle,
        })
    }

    /// Queue a preview request. A dead worker is logged and ignored;
    /// previews are cosmetic.
    pub fn request(&self, item: Item) {
        if self.requests.send(item).is_err() {
            debug!("Preview worker gone");
        }
    }

    /// Outcomes that arrived since the last call. Never blocks.
    pub fn drain(&self) -> Vec<PreviewOutcome> {
        self.outcomes.try_iter().collect()
    }
}
