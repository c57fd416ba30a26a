//! Keyboard routing.
//!
//! Modal input comes first: the transfer modal, then the help overlay, then
//! the filter input. Anything left goes through the key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::config::keybindings::KeyBindings;
use crate::model::{KeyAction, TransferError};
use crate::state::accumulator::{AccumulationMode, FetchTicket};
use crate::state::filter_input;
use crate::state::{AppState, Effect};

/// Handle one key press and return the effects it requests.
pub fn handle_key(state: &mut AppState, key: KeyEvent, bindings: &KeyBindings) -> Vec<Effect> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![Effect::Quit];
    }
    if state.transfer.is_open() {
        return handle_transfer_key(state, key);
    }
    if state.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            state.help_visible = false;
        }
        return Vec::new();
    }
    if state.filter.is_editing() {
        handle_filter_key(state, key);
        return Vec::new();
    }
    match bindings.get(key) {
        Some(action) => handle_action(state, action),
        None => Vec::new(),
    }
}

/// Keys while the transfer modal is open. Every key is consumed.
///
/// - Esc: close without side effects
/// - Enter: submit; on success the intent is emitted and the modal closes
/// - Tab: autocomplete from the address book
/// - Backspace: delete a character, or the whole resolved contact
fn handle_transfer_key(state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
    match key.code {
        KeyCode::Esc => {
            state.transfer.close();
            Vec::new()
        }
        KeyCode::Enter => match state.transfer.submit() {
            Ok(intent) => vec![Effect::Submit(intent)],
            Err(err) => {
                debug!(error = %err, "Transfer not submitted");
                Vec::new()
            }
        },
        KeyCode::Tab => {
            if let Some(draft) = state.transfer.draft_mut() {
                draft.autocomplete(&state.address_book);
            }
            Vec::new()
        }
        KeyCode::Backspace => {
            if let Some(draft) = state.transfer.draft_mut() {
                draft.backspace(&state.address_book);
            }
            Vec::new()
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(draft) = state.transfer.draft_mut() {
                draft.insert_char(ch);
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Keys while the filter input is focused. The view refilters on every key.
fn handle_filter_key(state: &mut AppState, key: KeyEvent) {
    let current = std::mem::take(&mut state.filter);
    state.filter = match key.code {
        KeyCode::Esc => filter_input::clear(current),
        KeyCode::Enter => filter_input::confirm(current),
        KeyCode::Backspace => filter_input::backspace(current),
        KeyCode::Left => filter_input::cursor_left(current),
        KeyCode::Right => filter_input::cursor_right(current),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            filter_input::insert_char(current, ch)
        }
        _ => current,
    };
    state.clamp_highlight();
}

/// Apply a bound action.
pub fn handle_action(state: &mut AppState, action: KeyAction) -> Vec<Effect> {
    let page = state.viewport_rows() as isize;
    match action {
        KeyAction::MoveUp => {
            state.move_highlight(-1);
            Vec::new()
        }
        KeyAction::MoveDown => move_down(state, 1),
        KeyAction::PageUp => {
            state.move_highlight(-page);
            Vec::new()
        }
        KeyAction::PageDown => move_down(state, page),
        KeyAction::MoveToTop => {
            state.set_highlight(0);
            Vec::new()
        }
        KeyAction::MoveToBottom => move_down(state, isize::MAX / 2),

        KeyAction::ToggleSelect => {
            state.toggle_highlighted();
            Vec::new()
        }
        KeyAction::SelectAllVisible => {
            state.select_all_rows();
            Vec::new()
        }
        KeyAction::DeselectAll => {
            state.selection.clear();
            Vec::new()
        }

        KeyAction::SendSelected => {
            let result = state.send_selected();
            report_transfer_error(state, result);
            Vec::new()
        }
        KeyAction::SendHighlighted => {
            if let Some(item) = state.highlighted_item().cloned() {
                let result = state.send_item(item);
                report_transfer_error(state, result);
            }
            Vec::new()
        }

        KeyAction::StartFilter => {
            let current = std::mem::take(&mut state.filter);
            state.filter = filter_input::activate(current);
            Vec::new()
        }
        KeyAction::ClearFilter => {
            state.filter = filter_input::clear(std::mem::take(&mut state.filter));
            state.clamp_highlight();
            Vec::new()
        }

        KeyAction::LoadMore | KeyAction::NextPage => next_page(state),
        KeyAction::PrevPage => {
            if state.accumulator.mode() == AccumulationMode::Paginate {
                state.accumulator.prev_page();
                state.set_highlight(0);
                state.clamp_highlight();
            }
            Vec::new()
        }
        KeyAction::Retry => fetch(state.accumulator.retry()),

        KeyAction::OpenLink => state
            .highlighted_item()
            .and_then(|item| state.primary_link(item))
            .map(Effect::OpenLink)
            .into_iter()
            .collect(),

        KeyAction::Help => {
            state.help_visible = !state.help_visible;
            Vec::new()
        }
        KeyAction::Quit => vec![Effect::Quit],
    }
}

/// Move down; landing on the last row loads more in infinite-scroll mode.
fn move_down(state: &mut AppState, delta: isize) -> Vec<Effect> {
    let on_last_row = state.move_highlight(delta);
    if on_last_row && state.accumulator.mode() == AccumulationMode::Flatten {
        fetch(state.accumulator.begin_request())
    } else {
        Vec::new()
    }
}

fn next_page(state: &mut AppState) -> Vec<Effect> {
    match state.accumulator.mode() {
        AccumulationMode::Flatten => fetch(state.accumulator.begin_request()),
        AccumulationMode::Paginate => {
            let ticket = state.accumulator.next_page();
            if ticket.is_none() {
                state.set_highlight(0);
                state.clamp_highlight();
            }
            fetch(ticket)
        }
    }
}

fn fetch(ticket: Option<FetchTicket>) -> Vec<Effect> {
    ticket.map(Effect::Fetch).into_iter().collect()
}

fn report_transfer_error(state: &mut AppState, result: Result<(), TransferError>) {
    if let Err(err) = result {
        state.status_message = Some(err.to_string());
    }
}

#[cfg(test)]
#[path = "key_handler_tests.rs"]
mod tests;
