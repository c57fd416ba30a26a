//! Acceptance tests: browsing, accumulation, pagination, filtering and
//! selection against the recorded fixture.

mod acceptance_harness;

use acceptance_harness::{AcceptanceTestHarness, HarnessOptions, EMPTY_FIXTURE, PAGES_FIXTURE};
use crossterm::event::KeyCode;
use nftdeck::state::{LoadStatus, ViewOptions};
use nftdeck::view_state::ColumnKind;

const PAGE_ONE: [&str; 3] = ["Genesis", "CK #2", "PUNK #7804"];
const ENS_LABEL: &str = "ENS #79233663829379634837";

fn paginated() -> HarnessOptions {
    HarnessOptions {
        view: ViewOptions {
            enable_pagination: true,
            ..ViewOptions::default()
        },
        ..HarnessOptions::default()
    }
}

// ===== Accumulation =====

#[test]
fn first_page_is_shown_after_launch() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);

    assert!(harness.is_running());
    assert_eq!(harness.row_labels(), PAGE_ONE);
    assert_eq!(harness.state().accumulator.status(), LoadStatus::Ready);

    let screen = harness.render_to_string();
    assert!(screen.contains("NFTs (3+)"), "screen:\n{screen}");
    assert!(screen.contains("CryptoKitties"));
    assert!(screen.contains("n load more"));
}

#[test]
fn reaching_the_last_row_accumulates_in_fetch_order() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);

    harness.send_key(KeyCode::End);
    assert_eq!(harness.state().accumulator.total_items(), 5);
    harness.send_key(KeyCode::End);

    assert_eq!(
        harness.row_labels(),
        ["Genesis", "CK #2", "PUNK #7804", ENS_LABEL, "PUNK #3100", "CK #3"]
    );
    assert!(!harness.state().accumulator.has_more());
    assert_eq!(harness.state().accumulator.page_count(), 3);
}

#[test]
fn load_more_key_fetches_next_page() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);
    harness.send_key(KeyCode::Char('n'));
    assert_eq!(harness.state().accumulator.total_items(), 5);
    assert_eq!(harness.state().highlight(), 0, "highlight stays put");
}

#[test]
fn nothing_more_to_load_after_last_page() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);
    harness.send_keys(&[KeyCode::Char('n'), KeyCode::Char('n')]);
    assert!(!harness.state().accumulator.has_more());

    harness.send_key(KeyCode::Char('n'));
    assert_eq!(harness.state().accumulator.total_items(), 6);
    assert!(!harness.render_to_string().contains("n load more"));
}

#[test]
fn malformed_fixture_items_are_skipped() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);
    harness.send_key(KeyCode::Char('n'));
    assert!(!harness.row_labels().iter().any(|l| l.contains("BRK")));
}

#[test]
fn long_token_ids_are_truncated_on_screen() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);
    harness.send_key(KeyCode::Char('n'));
    let screen = harness.render_to_string();
    assert!(screen.contains(ENS_LABEL));
    assert!(!screen.contains("792336638293796348375"));
}

#[test]
fn empty_source_shows_empty_status() {
    let mut harness = AcceptanceTestHarness::from_fixture(EMPTY_FIXTURE);
    assert_eq!(harness.state().accumulator.status(), LoadStatus::Empty);
    let screen = harness.render_to_string();
    assert!(screen.contains("No NFTs available or none detected"));
    assert!(!screen.contains("Loading"));
}

// ===== Pagination =====

#[test]
fn paginate_shows_one_page_at_a_time() {
    let mut harness = AcceptanceTestHarness::with_options(PAGES_FIXTURE, paginated());
    assert_eq!(harness.row_labels(), PAGE_ONE);

    harness.send_keys(&[KeyCode::Char(']'), KeyCode::Char(']')]);
    assert_eq!(harness.state().accumulator.current_page(), Some(2));
    assert_eq!(harness.row_labels(), ["CK #3"]);
    assert!(harness.render_to_string().contains("page 3"));

    harness.send_keys(&[KeyCode::Char('['), KeyCode::Char('[')]);
    assert_eq!(harness.state().accumulator.current_page(), Some(0));
    assert_eq!(harness.row_labels(), PAGE_ONE);
}

#[test]
fn revisiting_a_page_does_not_refetch() {
    let mut harness = AcceptanceTestHarness::with_options(PAGES_FIXTURE, paginated());
    harness.send_keys(&[KeyCode::Char(']'), KeyCode::Char('['), KeyCode::Char(']')]);
    assert_eq!(harness.state().accumulator.page_count(), 2);
    assert_eq!(harness.state().accumulator.current_page(), Some(1));
}

#[test]
fn moving_to_last_row_does_not_load_when_paginating() {
    let mut harness = AcceptanceTestHarness::with_options(PAGES_FIXTURE, paginated());
    harness.send_key(KeyCode::End);
    assert_eq!(harness.state().accumulator.page_count(), 1);
}

// ===== Filter =====

#[test]
fn filter_narrows_rows_case_insensitively() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);
    harness.send_key(KeyCode::Char('/'));
    harness.type_text("PUNK");
    assert_eq!(harness.row_labels(), ["PUNK #7804"]);

    harness.send_key(KeyCode::Enter);
    assert_eq!(harness.row_labels(), ["PUNK #7804"]);
    assert!(harness.render_to_string().contains("Filter (Esc clears)"));

    harness.send_key(KeyCode::Esc);
    assert_eq!(harness.row_labels(), PAGE_ONE);
}

#[test]
fn initial_filter_applies_on_launch() {
    let options = HarnessOptions {
        filter: Some("genesis".to_string()),
        ..HarnessOptions::default()
    };
    let harness = AcceptanceTestHarness::with_options(PAGES_FIXTURE, options);
    assert_eq!(harness.row_labels(), ["Genesis"]);
}

#[test]
fn selection_survives_filtering() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);
    harness.send_key(KeyCode::Char(' '));
    assert_eq!(harness.state().selection.len(), 1);

    harness.send_key(KeyCode::Char('/'));
    harness.type_text("punk");
    harness.send_key(KeyCode::Enter);
    assert_eq!(harness.state().selection.len(), 1, "hidden row stays selected");

    harness.send_key(KeyCode::Esc);
    let selected = harness.state().selected_items();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].token_label(), "Genesis");
}

#[test]
fn select_all_covers_only_filtered_rows() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);
    harness.send_key(KeyCode::Char('/'));
    harness.type_text("kitties");
    harness.send_key(KeyCode::Enter);
    harness.send_key(KeyCode::Char('a'));

    assert_eq!(harness.state().selection.len(), 2);
    assert!(harness.render_to_string().contains("2 NFTs selected"));

    harness.send_key(KeyCode::Char('x'));
    assert!(harness.state().selection.is_empty());
}

// ===== Mouse =====

#[test]
fn clicking_checkbox_toggles_that_row_only() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);
    harness.click_cell(1, ColumnKind::Checkbox);

    let selected = harness.state().selected_items();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].token_label(), "CK #2");

    harness.click_cell(1, ColumnKind::Checkbox);
    assert!(harness.state().selection.is_empty());
}

#[test]
fn clicking_collection_cell_toggles_row() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);
    harness.click_cell(2, ColumnKind::Collection);
    assert_eq!(harness.state().selection.len(), 1);
    assert_eq!(harness.state().highlight(), 2);
}

#[test]
fn clicking_token_opens_link_without_toggling() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);
    harness.click_cell(0, ColumnKind::Token);

    assert!(harness.state().selection.is_empty());
    assert_eq!(
        harness.opened(),
        ["https://opensea.io/assets/ethereum/0x06012c8cf97BEaD5deAe237070F9587f8E7A266d/1"]
    );
}

#[test]
fn clicking_link_title_opens_that_link() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);
    harness.click_cell(0, ColumnKind::Links);
    assert!(harness.state().selection.is_empty());
    assert_eq!(harness.opened().len(), 1);
    assert!(harness.opened()[0].starts_with("https://opensea.io/"));
}

#[test]
fn clicking_below_last_item_does_nothing() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);
    harness.click_cell(5, ColumnKind::Collection);
    assert!(harness.state().selection.is_empty());
}

#[test]
fn wheel_scroll_moves_highlight_and_loads_more() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);
    harness.scroll(true);
    assert_eq!(harness.state().highlight(), 1);
    harness.scroll(true);
    assert_eq!(harness.state().accumulator.total_items(), 5);
    harness.scroll(false);
    assert_eq!(harness.state().highlight(), 1);
}

// ===== Application =====

#[test]
fn help_overlay_toggles() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);
    harness.send_key(KeyCode::Char('?'));
    assert!(harness.render_to_string().contains("Keyboard Shortcuts"));
    harness.send_key(KeyCode::Esc);
    assert!(!harness.render_to_string().contains("Keyboard Shortcuts"));
}

#[test]
fn q_quits() {
    let mut harness = AcceptanceTestHarness::from_fixture(PAGES_FIXTURE);
    assert!(harness.send_key(KeyCode::Char('q')));
    assert!(!harness.is_running());
}
