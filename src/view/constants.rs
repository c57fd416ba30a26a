//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the title bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the selection/load-control bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the key hint line.
pub const HINT_BAR_HEIGHT: u16 = 1;

/// Height of the filter input widget (border + text).
pub const FILTER_INPUT_HEIGHT: u16 = 3;

/// Lines taken by the grid's border and column header above the first row.
pub const GRID_HEADER_ROWS: u16 = 2;

/// Width percentage of the preview side panel.
pub const PREVIEW_PANEL_WIDTH_PERCENT: u16 = 40;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Width percentage for the transfer modal.
pub const TRANSFER_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for the transfer modal.
pub const TRANSFER_POPUP_HEIGHT_PERCENT: u16 = 70;

/// Glyph for an image slot with a usable URL.
pub const IMAGE_GLYPH: &str = "▣";

/// Glyph for a missing or failed image.
pub const PLACEHOLDER_GLYPH: &str = "□";
