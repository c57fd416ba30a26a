//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod accumulator;
pub mod app_state;
pub mod filter;
pub mod filter_input;
pub mod key_handler;
pub mod mouse_handler;
pub mod selection;
pub mod transfer;

// Re-export for convenience
pub use accumulator::{AccumulationMode, FetchTicket, LoadStatus, PageAccumulator};
pub use app_state::{AppState, Effect, ViewOptions};
pub use filter::filter;
pub use filter_input::FilterInput;
pub use key_handler::{handle_action, handle_key};
pub use mouse_handler::{handle_click, handle_scroll};
pub use selection::SelectionTracker;
pub use transfer::{TransferDraft, TransferIntent, TransferKind, TransferState};
