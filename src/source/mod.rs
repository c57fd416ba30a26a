//! Page sources.
//!
//! This module provides the paged data sources the accumulator consumes:
//! - Gateway: HTTP collectibles endpoint, followed by opaque `next` URLs
//! - Fixture: a JSON file of recorded gateway pages
//!
//! Fetches run on a background worker ([`fetcher::PageFetcher`]) so the UI
//! thread never blocks on the network. Previews and image checks get workers
//! of their own.

use crate::model::{Cursor, FetchError, Page};
use std::path::PathBuf;

pub mod fetcher;
pub mod file;
pub mod gateway;
pub mod images;
pub mod preview;

pub use fetcher::{FetchOutcome, PageFetcher};
pub use file::FixtureSource;
pub use gateway::GatewaySource;
pub use images::{HttpImageVerifier, ImageCheck, ImageChecker, ImageVerifier};
pub use preview::{
    DisabledPreview, MarketplacePreview, PreviewFetcher, PreviewOutcome, PreviewProvider,
    DEFAULT_PREVIEW_BASE_URL,
};

/// A paged data source. The first call uses no cursor.
pub trait PageSource: Send {
    /// Fetch the page that `cursor` names.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the page cannot be retrieved or decoded.
    fn fetch_page(&mut self, cursor: Option<&Cursor>) -> Result<Page, FetchError>;

    /// Short human description for logs and the title bar.
    fn describe(&self) -> String;
}

/// Where pages come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Gateway {
        base_url: String,
        chain_id: u64,
        safe_address: String,
    },
    Fixture(PathBuf),
}

/// Build the source described by `spec`.
///
/// # Errors
///
/// Returns `FetchError::InvalidUrl` for a malformed gateway URL and
/// `FetchError::Io` / `FetchError::InvalidResponse` for unreadable fixtures.
pub fn open_source(spec: &SourceSpec) -> Result<Box<dyn PageSource>, FetchError> {
    match spec {
        SourceSpec::Gateway {
            base_url,
            chain_id,
            safe_address,
        } => Ok(Box::new(GatewaySource::new(
            base_url,
            *chain_id,
            safe_address,
        )?)),
        SourceSpec::Fixture(path) => Ok(Box::new(FixtureSource::load(path)?)),
    }
}
