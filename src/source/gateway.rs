//! Gateway HTTP page source.
//!
//! The first page is `GET {base}/v2/chains/{chain_id}/safes/{safe}/collectibles`.
//! Every response carries the absolute URL of the next page in `next`, which
//! is used verbatim as the following cursor.

use super::PageSource;
use crate::model::{Cursor, FetchError, Page};
use crate::parser::parse_page;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Blocking HTTP client for the collectibles endpoint.
#[derive(Debug, Clone)]
pub struct GatewaySource {
    client: Client,
    first_page: Url,
}

impl GatewaySource {
    /// Build a source for one wallet on one chain.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` if `base_url` is not an absolute URL,
    /// and `FetchError::Network` if the HTTP client cannot be built.
    pub fn new(base_url: &str, chain_id: u64, safe_address: &str) -> Result<Self, FetchError> {
        let first_page = collectibles_url(base_url, chain_id, safe_address)?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("nftdeck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, first_page })
    }

    /// URL requested for `cursor`.
    ///
    /// Absolute cursors are used as-is; relative ones resolve against the
    /// first page URL.
    fn url_for(&self, cursor: Option<&Cursor>) -> Result<Url, FetchError> {
        match cursor {
            None => Ok(self.first_page.clone()),
            Some(cursor) => match Url::parse(cursor.as_str()) {
                Ok(url) => Ok(url),
                Err(url::ParseError::RelativeUrlWithoutBase) => {
                    Ok(self.first_page.join(cursor.as_str())?)
                }
                Err(err) => Err(err.into()),
            },
        }
    }
}

/// `{base}/v2/chains/{chain_id}/safes/{safe}/collectibles`
pub fn collectibles_url(base_url: &str, chain_id: u64, safe_address: &str) -> Result<Url, FetchError> {
    let base = format!("{}/", base_url.trim_end_matches('/'));
    let base = Url::parse(&base)?;
    Ok(base.join(&format!(
        "v2/chains/{chain_id}/safes/{safe_address}/collectibles"
    ))?)
}

impl PageSource for GatewaySource {
    fn fetch_page(&mut self, cursor: Option<&Cursor>) -> Result<Page, FetchError> {
        let url = self.url_for(cursor)?;
        debug!(url = %url, "Requesting collectibles page");

        let body = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()?
            .error_for_status()?
            .text()?;

        let (page, errors) = parse_page(&body)?;
        for err in errors {
            warn!(error = %err, "Skipping malformed collectible");
        }
        Ok(page)
    }

    fn describe(&self) -> String {
        self.first_page.to_string()
    }
}
