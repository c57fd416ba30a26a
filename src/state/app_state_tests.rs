//! Tests for AppState.
//!
//! These tests verify pure state transitions without any TUI dependencies.

use super::*;
use crate::model::{AccountAddress, ContractAddress, Cursor, OwnerAuthorization, TokenId};

// ===== Test Helpers =====

const OWNER: &str = "0x1111111111111111111111111111111111111111";
const RECIPIENT: &str = "0x2222222222222222222222222222222222222222";

fn item(id: &str, token_name: &str) -> Item {
    Item::new(
        ContractAddress::new("0xabc").unwrap(),
        TokenId::new(id).unwrap(),
        token_name,
        "SYM",
    )
}

fn granted() -> Box<dyn Authorization + Send> {
    let owner = AccountAddress::parse(OWNER).unwrap();
    Box::new(OwnerAuthorization::new(Some(owner.clone()), vec![owner]))
}

fn state_with(options: ViewOptions, pages: Vec<Vec<Item>>) -> AppState {
    let mut state = AppState::new(options, granted());
    let count = pages.len();
    for (i, items) in pages.into_iter().enumerate() {
        let next = if i + 1 < count {
            Cursor::new(format!("c{}", i + 1))
        } else {
            None
        };
        let ticket = state.accumulator.begin_request().unwrap();
        state.apply_page(&ticket, Ok(Page::new(items).with_next(next)));
    }
    state
}

fn abc() -> AppState {
    state_with(
        ViewOptions::default(),
        vec![vec![item("A", "Apes"), item("B", "Birds"), item("C", "Cats")]],
    )
}

fn ids(items: &[Item]) -> Vec<String> {
    items.iter().map(|i| i.id().to_string()).collect()
}

fn row_ids(state: &AppState) -> Vec<String> {
    state.rows().iter().map(|i| i.id().to_string()).collect()
}

fn key(id: &str) -> ItemKey {
    item(id, "").key()
}

// ===== Selection Tests =====

#[test]
fn send_selected_uses_accumulated_order() {
    let mut state = abc();
    state.toggle_selection(key("C"));
    state.toggle_selection(key("A"));

    state.send_selected().unwrap();

    let draft = state.transfer.draft().unwrap();
    assert_eq!(ids(draft.items()), vec!["A", "C"]);
    assert_eq!(draft.recipient(), "");
}

#[test]
fn direct_send_bypasses_selection() {
    let mut state = abc();
    state.toggle_selection(key("A"));
    state.toggle_selection(key("C"));

    let b = state.rows()[1].clone();
    state.send_item(b).unwrap();

    let draft = state.transfer.draft().unwrap();
    assert_eq!(ids(draft.items()), vec!["B"]);
    assert_eq!(state.selection.len(), 2, "Selection untouched");
}

#[test]
fn send_selected_with_nothing_selected_fails() {
    let mut state = abc();
    assert_eq!(state.send_selected(), Err(TransferError::NothingSelected));
    assert!(!state.transfer.is_open());
}

#[test]
fn send_requires_authorization() {
    let mut state = AppState::new(
        ViewOptions::default(),
        Box::new(OwnerAuthorization::read_only()),
    );
    let ticket = state.accumulator.begin_request().unwrap();
    state.apply_page(&ticket, Ok(Page::new(vec![item("A", "Apes")])));

    assert!(!state.is_granted());
    let a = state.rows()[0].clone();
    assert_eq!(state.send_item(a), Err(TransferError::NotGranted));
}

#[test]
fn selection_survives_refiltering() {
    let mut state = abc();
    state.toggle_selection(key("A"));

    state.filter = FilterInput::with_needle("cats");
    assert_eq!(row_ids(&state), vec!["C"]);
    assert!(state.selection.contains(&key("A")));

    state.filter = FilterInput::Idle;
    assert!(state.selection.contains(&key("A")));
}

#[test]
fn selection_ignores_unknown_keys() {
    let mut state = abc();
    state.toggle_selection(key("Z"));
    assert!(state.selection.is_empty());
}

#[test]
fn selection_disabled_without_batch_select() {
    let options = ViewOptions {
        enable_batch_select: false,
        ..ViewOptions::default()
    };
    let mut state = state_with(options, vec![vec![item("A", "Apes")]]);
    state.toggle_selection(key("A"));
    assert!(state.selection.is_empty());
}

#[test]
fn select_all_rows_uses_filtered_rows() {
    let mut state = abc();
    state.toggle_selection(key("A"));
    state.filter = FilterInput::with_needle("b");

    state.select_all_rows();

    assert_eq!(state.selection.len(), 1);
    assert!(state.selection.contains(&key("B")));
}

#[test]
fn selected_items_skips_duplicate_keys() {
    let mut state = state_with(
        ViewOptions::default(),
        vec![vec![item("A", "Apes")], vec![item("A", "Apes")]],
    );
    state.toggle_selection(key("A"));
    assert_eq!(ids(&state.selected_items()), vec!["A"]);
}

#[test]
fn successful_submit_clears_selection() {
    let mut state = abc();
    state.toggle_selection(key("A"));
    state.send_selected().unwrap();
    for ch in RECIPIENT.chars() {
        state.transfer.draft_mut().unwrap().insert_char(ch);
    }
    let intent = state.transfer.submit().unwrap();

    state.finish_submit(&intent, Ok(()));

    assert!(state.selection.is_empty());
    assert!(state.status_message.as_deref().unwrap().contains("submitted"));
}

#[test]
fn failed_submit_keeps_selection() {
    let mut state = abc();
    state.toggle_selection(key("A"));
    state.send_selected().unwrap();
    for ch in RECIPIENT.chars() {
        state.transfer.draft_mut().unwrap().insert_char(ch);
    }
    let intent = state.transfer.submit().unwrap();

    state.finish_submit(&intent, Err("disk full".to_string()));

    assert_eq!(state.selection.len(), 1);
    assert!(state.status_message.as_deref().unwrap().contains("disk full"));
}

// ===== Highlight Tests =====

#[test]
fn move_highlight_clamps_and_reports_last_row() {
    let mut state = abc();
    assert!(!state.move_highlight(1));
    assert!(state.move_highlight(5));
    assert_eq!(state.highlight(), 2);
    assert!(!state.move_highlight(-10));
    assert_eq!(state.highlight(), 0);
}

#[test]
fn highlight_scrolls_viewport() {
    let items: Vec<Item> = (0..30).map(|i| item(&i.to_string(), "X")).collect();
    let mut state = state_with(ViewOptions::default(), vec![items]);
    state.set_viewport_rows(10);

    state.move_highlight(15);

    assert_eq!(state.highlight(), 15);
    assert_eq!(state.scroll_offset(), 6);
}

#[test]
fn clamp_highlight_after_filter_shrinks_rows() {
    let mut state = abc();
    state.move_highlight(2);
    state.filter = FilterInput::with_needle("apes");
    state.clamp_highlight();
    assert_eq!(state.highlight(), 0);
}

// ===== Paging Tests =====

#[test]
fn pagination_shows_only_current_page() {
    let options = ViewOptions {
        enable_pagination: true,
        ..ViewOptions::default()
    };
    let state = state_with(
        options,
        vec![
            vec![item("1", "X"), item("2", "X")],
            vec![item("3", "X")],
            vec![item("4", "X")],
        ],
    );
    assert_eq!(state.accumulator.current_page(), Some(2));
    assert_eq!(row_ids(&state), vec!["4"]);
}

#[test]
fn selection_spans_pages_in_pagination_mode() {
    let options = ViewOptions {
        enable_pagination: true,
        ..ViewOptions::default()
    };
    let mut state = state_with(options, vec![vec![item("1", "X")], vec![item("2", "X")]]);
    state.toggle_selection(key("1"));
    state.toggle_selection(key("2"));
    assert_eq!(ids(&state.selected_items()), vec!["1", "2"]);
}

// ===== Preview Tests =====

#[test]
fn preview_request_only_when_enabled() {
    let mut state = abc();
    assert!(state.take_preview_request().is_none());
}

#[test]
fn preview_requested_once_per_item() {
    let options = ViewOptions {
        enable_preview: true,
        ..ViewOptions::default()
    };
    let mut state = state_with(options, vec![vec![item("A", "Apes")]]);

    let requested = state.take_preview_request().unwrap();
    assert_eq!(requested.id().as_str(), "A");
    assert_eq!(state.preview(&key("A")), Some(&PreviewState::Loading));
    assert!(state.take_preview_request().is_none());
}

#[test]
fn unreachable_logo_is_marked_failed_even_when_preview_fails() {
    let options = ViewOptions {
        enable_preview: true,
        ..ViewOptions::default()
    };
    let mut state = state_with(
        options,
        vec![vec![item("A", "Apes").with_logo_uri("http://127.0.0.1:1/logo.png")]],
    );
    state.take_preview_request();
    state.apply_preview(
        key("A"),
        Err(FetchError::Network {
            reason: "connection refused".to_string(),
        }),
    );

    let checks = state.take_image_checks();
    assert_eq!(checks, vec!["http://127.0.0.1:1/logo.png".to_string()]);
    state.apply_image_check(checks[0].clone(), false);

    assert!(!state.image_available(Some("http://127.0.0.1:1/logo.png")));
}

#[test]
fn image_checks_run_with_preview_disabled() {
    let mut state = state_with(
        ViewOptions::default(),
        vec![vec![
            item("A", "Apes")
                .with_logo_uri("https://img/apes.png")
                .with_image_uri("https://img/a.png"),
            item("B", "Birds").with_logo_uri("https://img/apes.png"),
            item("C", "Cats").with_logo_uri("  "),
        ]],
    );

    assert_eq!(
        state.take_image_checks(),
        vec!["https://img/apes.png".to_string(), "https://img/a.png".to_string()]
    );
    assert!(state.take_image_checks().is_empty());
}

#[test]
fn reachable_image_stays_available() {
    let mut state = abc();
    state.apply_image_check("https://img/a".to_string(), true);
    assert!(state.image_available(Some("https://img/a")));
}

#[test]
fn image_available_rejects_blank_urls() {
    let state = abc();
    assert!(!state.image_available(None));
    assert!(!state.image_available(Some("  ")));
}

// ===== Links Tests =====

#[test]
fn primary_link_uses_first_template() {
    let state = abc();
    let a = state.rows()[0].clone();
    let url = state.primary_link(&a).unwrap();
    assert!(url.contains("0xabc"));
    assert!(url.contains("/A"));
}
