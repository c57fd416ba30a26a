//! Mouse event handler.
//!
//! Pure functions that transform AppState in response to resolved click
//! targets. Each target is handled exactly once: inner regions never fall
//! through to the row handler.

use crate::state::accumulator::AccumulationMode;
use crate::state::{AppState, Effect};
use crate::view_state::HitTarget;

/// Handle a click on the grid.
pub fn handle_click(state: &mut AppState, target: HitTarget) -> Vec<Effect> {
    if state.transfer.is_open() || state.help_visible {
        return Vec::new();
    }
    match target {
        HitTarget::Miss => Vec::new(),
        HitTarget::Row(row) | HitTarget::Checkbox(row) => {
            state.set_highlight(row);
            state.toggle_highlighted();
            Vec::new()
        }
        HitTarget::TokenLink(row) => {
            state.set_highlight(row);
            state
                .highlighted_item()
                .and_then(|item| state.primary_link(item))
                .map(Effect::OpenLink)
                .into_iter()
                .collect()
        }
        HitTarget::Link { row, link } => {
            state.set_highlight(row);
            let url = state.highlighted_item().and_then(|item| {
                state
                    .links
                    .for_chain(state.chain_id)
                    .get(link)
                    .map(|t| t.url_for(item, state.chain_id))
            });
            url.map(Effect::OpenLink).into_iter().collect()
        }
        HitTarget::Send(row) => {
            state.set_highlight(row);
            if let Some(item) = state.highlighted_item().cloned() {
                if let Err(err) = state.send_item(item) {
                    state.status_message = Some(err.to_string());
                }
            }
            Vec::new()
        }
    }
}

/// Handle a wheel scroll of `delta` rows. Scrolling onto the last row loads
/// more in infinite-scroll mode.
pub fn handle_scroll(state: &mut AppState, delta: isize) -> Vec<Effect> {
    if state.transfer.is_open() {
        return Vec::new();
    }
    let on_last_row = state.move_highlight(delta);
    if delta > 0 && on_last_row && state.accumulator.mode() == AccumulationMode::Flatten {
        state
            .accumulator
            .begin_request()
            .map(Effect::Fetch)
            .into_iter()
            .collect()
    } else {
        Vec::new()
    }
}
