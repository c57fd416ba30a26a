//! Table styling configuration.
//!
//! Provides the palette for rows, selection, the send affordance and errors,
//! collapsing to terminal defaults when colors are disabled.

use ratatui::style::{Color, Modifier, Style};

/// Dimmed text for hints and placeholder rows.
pub const MUTED_TEXT: Style = Style::new().fg(Color::DarkGray);

/// Bold cyan heading used by overlays.
pub const SECTION_HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors forced on or off, ignoring the environment.
    pub fn fixed(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::fixed(true)
    }
}

// ===== TableStyles =====

/// Styles for every part of the holdings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStyles {
    pub header: Style,
    pub row: Style,
    /// Row under the keyboard highlight. Reversed even without colors.
    pub highlighted: Style,
    pub selected: Style,
    pub link: Style,
    pub send: Style,
    pub placeholder: Style,
    pub error: Style,
    pub accent: Style,
}

impl TableStyles {
    /// Build styles for the given color configuration.
    ///
    /// If colors are disabled, only modifiers remain.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                header: Style::default().add_modifier(Modifier::BOLD),
                row: Style::default(),
                highlighted: Style::default().bg(Color::DarkGray),
                selected: Style::default().fg(Color::Green),
                link: Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
                send: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                placeholder: MUTED_TEXT,
                error: Style::default().fg(Color::Red),
                accent: Style::default().fg(Color::Cyan),
            }
        } else {
            Self {
                header: Style::default().add_modifier(Modifier::BOLD),
                row: Style::default(),
                highlighted: Style::default().add_modifier(Modifier::REVERSED),
                selected: Style::default().add_modifier(Modifier::BOLD),
                link: Style::default().add_modifier(Modifier::UNDERLINED),
                send: Style::default().add_modifier(Modifier::BOLD),
                placeholder: Style::default().add_modifier(Modifier::DIM),
                error: Style::default().add_modifier(Modifier::BOLD),
                accent: Style::default(),
            }
        }
    }
}

impl Default for TableStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::default())
    }
}

// ===== Tests =====
