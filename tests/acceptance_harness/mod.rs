//! Acceptance Test Harness for TUI testing
//!
//! Wraps `TuiApp<TestBackend>` with a fixture-backed page source, an
//! in-memory transaction pipeline and a recording link opener, so tests can
//! drive the whole app with keys and clicks and inspect what came out.

#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use nftdeck::config::KeyBindings;
use nftdeck::model::{AccountAddress, AddressBook, Contact, OwnerAuthorization, PipelineError};
use nftdeck::pipeline::TransactionPipeline;
use nftdeck::source::{FixtureSource, PageFetcher};
use nftdeck::state::{AppState, TransferIntent, ViewOptions};
use nftdeck::view::{compute_areas, Services, TableStyles, TuiApp};
use nftdeck::view_state::ColumnKind;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::sync::{Arc, Mutex};

pub const PAGES_FIXTURE: &str = "tests/fixtures/pages.json";
pub const EMPTY_FIXTURE: &str = "tests/fixtures/empty.json";

pub const OWNER: &str = "0x1111111111111111111111111111111111111111";
pub const ALICE: &str = "0x2222222222222222222222222222222222222222";

/// Pipeline whose submissions stay visible to the test.
#[derive(Clone, Default)]
struct SharedPipeline {
    submitted: Arc<Mutex<Vec<TransferIntent>>>,
    fail: bool,
}

impl TransactionPipeline for SharedPipeline {
    fn submit(&mut self, intent: &TransferIntent) -> Result<(), PipelineError> {
        if self.fail {
            return Err(std::io::Error::other("pipeline offline").into());
        }
        self.submitted.lock().unwrap().push(intent.clone());
        Ok(())
    }
}

/// How to build the app under test.
#[derive(Debug, Clone)]
pub struct HarnessOptions {
    pub view: ViewOptions,
    /// Signer is one of the owners.
    pub granted: bool,
    pub failing_pipeline: bool,
    pub filter: Option<String>,
    pub width: u16,
    pub height: u16,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            view: ViewOptions::default(),
            granted: true,
            failing_pipeline: false,
            filter: None,
            width: 100,
            height: 24,
        }
    }
}

/// Test harness for acceptance testing
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    submitted: Arc<Mutex<Vec<TransferIntent>>>,
    opened: Arc<Mutex<Vec<String>>>,
    area: Rect,
}

impl AcceptanceTestHarness {
    /// Load fixture with default options and wait for the first page.
    pub fn from_fixture(path: &str) -> Self {
        Self::with_options(path, HarnessOptions::default())
    }

    pub fn with_options(path: &str, options: HarnessOptions) -> Self {
        let owner = AccountAddress::parse(OWNER).unwrap();
        let auth = if options.granted {
            OwnerAuthorization::new(Some(owner.clone()), vec![owner])
        } else {
            OwnerAuthorization::new(None, vec![owner])
        };

        let mut book = AddressBook::new();
        book.insert(Contact::new(AccountAddress::parse(ALICE).unwrap(), "alice"));

        let mut state = AppState::new(options.view, Box::new(auth))
            .with_address_book(book)
            .with_owner_label(OWNER);
        if let Some(needle) = &options.filter {
            state = state.with_filter(needle.clone());
        }

        let pipeline = SharedPipeline {
            fail: options.failing_pipeline,
            ..SharedPipeline::default()
        };
        let submitted = pipeline.submitted.clone();
        let opened = Arc::new(Mutex::new(Vec::new()));
        let opened_by_app = opened.clone();

        let source = FixtureSource::load(path).expect("fixture loads");
        let services = Services {
            fetcher: PageFetcher::spawn(Box::new(source)).unwrap(),
            previews: None,
            images: None,
            pipeline: Box::new(pipeline),
            open_link: Box::new(move |url: &str| {
                opened_by_app.lock().unwrap().push(url.to_string());
                Ok(())
            }),
        };

        let terminal = Terminal::new(TestBackend::new(options.width, options.height)).unwrap();
        let app = TuiApp::with_terminal(
            terminal,
            state,
            services,
            KeyBindings::default(),
            TableStyles::default(),
        );
        let mut harness = Self {
            app,
            submitted,
            opened,
            area: Rect::new(0, 0, options.width, options.height),
        };
        harness.settle();
        harness
    }

    /// Wait for in-flight page requests, then redraw.
    pub fn settle(&mut self) {
        self.app.settle();
        self.app.draw().unwrap();
    }

    /// Send a key press. Returns `true` if the app quit.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        let quit = self.app.handle_key_event(KeyEvent::new(key, mods));
        self.settle();
        quit
    }

    pub fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Type text character by character.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.send_key(KeyCode::Char(ch));
        }
    }

    /// Left click at absolute screen coordinates.
    pub fn click_at(&mut self, column: u16, row: u16) {
        self.app.handle_mouse_event(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
        self.settle();
    }

    /// Click inside column `kind` on the data row `row` screen lines below
    /// the grid header.
    pub fn click_cell(&mut self, row: u16, kind: ColumnKind) {
        let body = compute_areas(self.area, self.app.app_state()).grid_body();
        let column = *self
            .app
            .columns()
            .expect("grid drawn")
            .columns()
            .iter()
            .find(|c| c.kind == kind)
            .expect("column present");
        self.click_at(body.x + column.x, body.y + row);
    }

    pub fn scroll(&mut self, down: bool) {
        let kind = if down {
            MouseEventKind::ScrollDown
        } else {
            MouseEventKind::ScrollUp
        };
        self.app.handle_mouse_event(MouseEvent {
            kind,
            column: 1,
            row: 5,
            modifiers: KeyModifiers::NONE,
        });
        self.settle();
    }

    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    pub fn is_running(&self) -> bool {
        self.app.is_running()
    }

    pub fn submitted(&self) -> Vec<TransferIntent> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    /// Current screen as text, blank lines dropped.
    pub fn render_to_string(&mut self) -> String {
        self.app.draw().unwrap();
        let buffer = self.app.terminal().backend().buffer();
        let area = buffer.area;
        let mut lines = Vec::new();
        for y in area.top()..area.bottom() {
            let line: String = (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            let trimmed = line.trim_end();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }
        lines.join("\n")
    }

    /// Row labels currently in the grid, in order.
    pub fn row_labels(&self) -> Vec<String> {
        self.state().rows().iter().map(|i| i.token_label()).collect()
    }
}
