//! Error types for nftdeck.
//!
//! This module defines a hierarchical error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all shell failures
//!   - [`FetchError`] - Page or preview request failures (network, HTTP status, bad JSON)
//!   - [`PipelineError`] - Failures writing a transfer intent to the outbound pipeline
//!   - `std::io::Error` - Terminal/TUI rendering failures
//! - [`ParseError`] - A single malformed gateway item (skipped, never fatal)
//! - [`TransferError`] - Transfer modal validation failures (shown inside the modal)
//!
//! # Error Recovery Strategy
//!
//! No error is fatal to the grid. A failed page fetch is shown next to the load control,
//! previously accumulated pages are kept, and the user may retry the same cursor. A
//! malformed item is logged and skipped. Image failures only swap a glyph. Terminal
//! errors are the only fatal class and propagate to `main`.

use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Initial page request could not be issued or the source could not be built.
    #[error("Failed to load NFTs: {0}")]
    Fetch(#[from] FetchError),

    /// Failed to hand a transfer intent to the pipeline.
    #[error("Failed to submit transfer intent: {0}")]
    Pipeline(#[from] PipelineError),

    /// Terminal or TUI rendering error.
    ///
    /// This is a **fatal error** - without a working terminal, the TUI cannot function.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when requesting a page (or a preview) from a source.
///
/// Stored in UI state so that the status line can render it next to the control
/// that triggered the request; hence `Clone` and string reasons instead of
/// wrapping non-clonable library errors.
///
/// # Recovery
///
/// All variants are recoverable by re-triggering the request. The accumulator
/// keeps the failed cursor so a retry re-requests exactly the same page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, DNS, TLS, or timeout failure.
    #[error("Network error: {reason}")]
    Network {
        /// Description from the HTTP client.
        reason: String,
    },

    /// Non-success HTTP status from the gateway.
    #[error("HTTP {status} from {url}")]
    Http {
        /// Status code returned.
        status: u16,
        /// URL that was requested.
        url: String,
    },

    /// Response body was not a valid page.
    #[error("Invalid response: {reason}")]
    InvalidResponse {
        /// Parser error details.
        reason: String,
    },

    /// Cursor does not correspond to any page the source knows about.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unknown page cursor: {0}")]
    UnknownCursor(String),

    /// Local I/O failure (fixture file read).
    #[error("IO error: {reason}")]
    Io {
        /// Description of the I/O failure.
        reason: String,
    },

    /// The background worker exited and can no longer serve requests.
    #[error("Fetch worker disconnected")]
    WorkerDisconnected,
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io {
            reason: err.to_string(),
        }
    }
}

impl From<url::ParseError> for FetchError {
    fn from(err: url::ParseError) -> Self {
        FetchError::InvalidUrl(err.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Http {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None if err.is_decode() => FetchError::InvalidResponse {
                reason: err.to_string(),
            },
            None => FetchError::Network {
                reason: err.to_string(),
            },
        }
    }
}

/// A single gateway item that could not be turned into an [`Item`](super::Item).
///
/// Non-fatal: the item is logged with its position and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Required field is missing or empty.
    #[error("Item {index}: missing required field '{field}'")]
    MissingField {
        /// Zero-based position of the item within its page.
        index: usize,
        /// Name of the missing field as it appears on the wire.
        field: &'static str,
    },
}

/// Transfer modal validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The authorization check failed; the UI is read-only.
    #[error("Read only: not permitted to create transactions")]
    NotGranted,

    /// Batch send requested with an empty selection.
    #[error("No NFTs selected")]
    NothingSelected,

    /// Submit pressed with an empty recipient field.
    #[error("Recipient is required")]
    EmptyRecipient,

    /// Recipient is not a well-formed address.
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),
}

/// Failures writing an intent to the outbound pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Could not open or write the intent sink.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Could not serialize the intent.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
