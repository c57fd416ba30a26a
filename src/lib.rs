//! nftdeck
//!
//! TUI application for browsing a wallet's NFT holdings page by page,
//! selecting items and handing transfer intents to a transaction pipeline.
//!
//! Follows a Pure Core / Impure Shell split: `model`, `parser`, `state` and
//! `view_state` are pure; `source`, `pipeline` and `view` do the I/O.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod test_harness;
