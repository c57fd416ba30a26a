//! Screen layout.
//!
//! Pure area calculation shared by rendering and mouse hit-testing, plus
//! the top-level render pass.

use super::constants::{
    FILTER_INPUT_HEIGHT, GRID_HEADER_ROWS, HEADER_HEIGHT, HINT_BAR_HEIGHT,
    PREVIEW_PANEL_WIDTH_PERCENT, STATUS_BAR_HEIGHT,
};
use super::styles::TableStyles;
use super::{grid, help, preview, status, transfer_modal};
use crate::state::AppState;
use crate::view_state::ColumnLayout;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub header: Rect,
    /// Present while the filter is being edited or applied.
    pub filter: Option<Rect>,
    /// Bordered grid, including its column header.
    pub grid: Rect,
    pub preview: Option<Rect>,
    pub status: Rect,
    pub hints: Rect,
}

impl ScreenAreas {
    /// Area holding data rows only.
    pub fn grid_body(&self) -> Rect {
        let g = self.grid;
        Rect {
            x: g.x.saturating_add(1),
            y: g.y.saturating_add(GRID_HEADER_ROWS),
            width: g.width.saturating_sub(2),
            height: g.height.saturating_sub(GRID_HEADER_ROWS + 1),
        }
    }
}

/// Split `area` for the current state.
pub fn compute_areas(area: Rect, state: &AppState) -> ScreenAreas {
    let show_filter = state.filter.is_editing() || !state.filter.needle().is_empty();
    let filter_height = if show_filter { FILTER_INPUT_HEIGHT } else { 0 };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(filter_height),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
            Constraint::Length(HINT_BAR_HEIGHT),
        ])
        .split(area);

    let (grid, preview) = if state.options.enable_preview {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(100 - PREVIEW_PANEL_WIDTH_PERCENT),
                Constraint::Percentage(PREVIEW_PANEL_WIDTH_PERCENT),
            ])
            .split(rows[2]);
        (cols[0], Some(cols[1]))
    } else {
        (rows[2], None)
    };

    ScreenAreas {
        header: rows[0],
        filter: show_filter.then_some(rows[1]),
        grid,
        preview,
        status: rows[3],
        hints: rows[4],
    }
}

/// Render the whole screen. Returns the column geometry used for the grid.
pub fn render_layout(frame: &mut Frame, state: &AppState, styles: &TableStyles) -> ColumnLayout {
    let areas = compute_areas(frame.area(), state);

    render_header(frame, areas.header, state, styles);
    if let Some(filter_area) = areas.filter {
        status::render_filter_input(frame, filter_area, state, styles);
    }
    let columns = grid::render_grid(frame, areas.grid, state, styles);
    if let Some(preview_area) = areas.preview {
        preview::render_preview_panel(frame, preview_area, state, styles);
    }
    status::render_status_bar(frame, areas.status, state, styles);
    render_hints(frame, areas.hints, state, styles);

    if state.transfer.is_open() {
        transfer_modal::render_transfer_modal(frame, state, styles);
    }
    if state.help_visible {
        help::render_help_overlay(frame, styles);
    }

    columns
}

/// Rect centered in `area` covering the given percentages of it.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, styles: &TableStyles) {
    let mut spans = vec![Span::styled(" NFTs ", styles.header)];
    if !state.owner_label.is_empty() {
        spans.push(Span::styled(state.owner_label.clone(), styles.accent));
    }
    spans.push(Span::styled(
        format!("  chain {}", state.chain_id),
        styles.placeholder,
    ));
    if !state.is_granted() {
        spans.push(Span::styled("  [read only]", styles.placeholder));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_hints(frame: &mut Frame, area: Rect, state: &AppState, styles: &TableStyles) {
    let text = if state.transfer.is_open() {
        "Enter send · Tab complete · Esc cancel"
    } else if state.filter.is_editing() {
        "Enter apply · Esc clear"
    } else {
        "j/k move · Space select · s send · / filter · o open · ? help · q quit"
    };
    frame.render_widget(Paragraph::new(Span::styled(text, styles.placeholder)), area);
}
