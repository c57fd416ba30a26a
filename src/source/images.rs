//! Image reachability checks.
//!
//! Logo and preview image URLs are checked once each on a background worker,
//! independently of preview metadata. An unreachable URL is reported back so
//! the grid can draw the placeholder glyph instead.

use super::fetcher::spawn_worker;
use crate::model::FetchError;
use reqwest::blocking::Client;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::debug;

const IMAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Decides whether an image URL can be loaded.
pub trait ImageVerifier: Send {
    fn is_reachable(&mut self, url: &str) -> bool;
}

/// Verifier issuing an HTTP `HEAD` per URL.
#[derive(Debug, Clone)]
pub struct HttpImageVerifier {
    client: Client,
}

impl HttpImageVerifier {
    /// # Errors
    ///
    /// Returns `FetchError::Network` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().timeout(IMAGE_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

impl ImageVerifier for HttpImageVerifier {
    fn is_reachable(&mut self, url: &str) -> bool {
        match self.client.head(url).send() {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!(url, error = %err, "Image unreachable");
                false
            }
        }
    }
}

/// Result of checking one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCheck {
    pub url: String,
    pub reachable: bool,
}

/// Runs an [`ImageVerifier`] on a background thread.
#[derive(Debug)]
pub struct ImageChecker {
    requests: Sender<String>,
    outcomes: Receiver<ImageCheck>,
    _handle: JoinHandle<()>,
}

impl ImageChecker {
    /// # Errors
    ///
    /// Returns an I/O error if the thread cannot be spawned.
    pub fn spawn(mut verifier: Box<dyn ImageVerifier>) -> std::io::Result<Self> {
        let (requests, outcomes, handle) = spawn_worker("nftdeck-images", move |url: String| {
            let reachable = verifier.is_reachable(&url);
            ImageCheck { url, reachable }
        })?;
        Ok(Self {
            requests,
            outcomes,
            _handle: handle,
        })
    }

    pub fn request(&self, url: String) {
        if self.requests.send(url).is_err() {
            debug!("Image worker gone");
        }
    }

    /// Checks that finished since the last call. Never blocks.
    pub fn drain(&self) -> Vec<ImageCheck> {
        self.outcomes.try_iter().collect()
    }

    /// Block for the next finished check.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::WorkerDisconnected` if the worker has exited.
    pub fn recv(&self) -> Result<ImageCheck, FetchError> {
        self.outcomes
            .recv()
            .map_err(|_| FetchError::WorkerDisconnected)
    }
}
