//! TUI rendering and terminal management (impure shell)
//!
//! The event loop polls crossterm with a short tick, routes input through the
//! pure handlers in [`crate::state`], performs the [`Effect`]s they return,
//! and drains worker outcomes between events.

pub mod constants;
pub mod grid;
pub mod help;
pub mod layout;
pub mod preview;
pub mod status;
pub mod styles;
pub mod transfer_modal;

pub use help::render_help_overlay;
pub use layout::{compute_areas, render_layout, ScreenAreas};
pub use styles::{ColorConfig, TableStyles};

use crate::config::keybindings::KeyBindings;
use crate::model::AppError;
use crate::pipeline::TransactionPipeline;
use crate::source::{ImageChecker, PageFetcher, PreviewFetcher};
use crate::state::{handle_click, handle_key, handle_scroll, AppState, Effect};
use crate::view_state::{hit_test, ColumnLayout, HitTarget};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Poll timeout; worker outcomes are drained at least this often.
const TICK: Duration = Duration::from_millis(100);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Opens a URL outside the terminal.
pub type LinkOpener = Box<dyn FnMut(&str) -> io::Result<()> + Send>;

/// Opener backed by the system browser.
pub fn system_opener() -> LinkOpener {
    Box::new(|url: &str| open::that(url))
}

/// Everything the loop talks to besides the terminal.
pub struct Services {
    pub fetcher: PageFetcher,
    /// Present when previews are enabled.
    pub previews: Option<PreviewFetcher>,
    /// Reachability checks for logo and preview image URLs.
    pub images: Option<ImageChecker>,
    pub pipeline: Box<dyn TransactionPipeline>,
    pub open_link: LinkOpener,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    services: Services,
    key_bindings: KeyBindings,
    styles: TableStyles,
    /// Column geometry of the last rendered grid (for mouse hit-testing)
    last_columns: Option<ColumnLayout>,
    running: bool,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(
        app_state: AppState,
        services: Services,
        key_bindings: KeyBindings,
        styles: TableStyles,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(
            terminal,
            app_state,
            services,
            key_bindings,
            styles,
        ))
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build an app on any backend and request the first page.
    pub fn with_terminal(
        terminal: Terminal<B>,
        app_state: AppState,
        services: Services,
        key_bindings: KeyBindings,
        styles: TableStyles,
    ) -> Self {
        let mut app = Self {
            terminal,
            app_state,
            services,
            key_bindings,
            styles,
            last_columns: None,
            running: true,
        };
        if let Some(ticket) = app.app_state.accumulator.begin_request() {
            app.perform(Effect::Fetch(ticket));
        }
        app
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (q or Ctrl+C).
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        while self.running {
            let mut dirty = false;
            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(key);
                        dirty = true;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse_event(mouse);
                        dirty = true;
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                        self.request_lazy_fetches();
                        dirty = true;
                    }
                    _ => {}
                }
            }

            dirty |= self.pump();
            if dirty && self.running {
                self.draw()?;
            }
        }

        info!("Quit requested");
        Ok(())
    }

    /// Route one key press. Returns `true` once the app should quit.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        let effects = handle_key(&mut self.app_state, key, &self.key_bindings);
        self.perform_all(effects);
        self.request_lazy_fetches();
        !self.running
    }

    /// Route one mouse event.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let effects = match mouse.kind {
            MouseEventKind::ScrollUp => handle_scroll(&mut self.app_state, -1),
            MouseEventKind::ScrollDown => handle_scroll(&mut self.app_state, 1),
            MouseEventKind::Down(MouseButton::Left) => {
                let target = self.target_at(mouse.column, mouse.row);
                debug!(?target, x = mouse.column, y = mouse.row, "Click");
                handle_click(&mut self.app_state, target)
            }
            _ => Vec::new(),
        };
        self.perform_all(effects);
        self.request_lazy_fetches();
    }

    /// Resolve a screen position against the last rendered grid.
    fn target_at(&self, x: u16, y: u16) -> HitTarget {
        let Some(columns) = &self.last_columns else {
            return HitTarget::Miss;
        };
        let body = compute_areas(self.frame_area(), &self.app_state).grid_body();
        if x < body.x || y < body.y || x >= body.right() || y >= body.bottom() {
            return HitTarget::Miss;
        }
        hit_test(
            columns,
            x - body.x,
            y - body.y,
            self.app_state.scroll_offset(),
            self.app_state.rows().len(),
        )
    }

    fn frame_area(&self) -> Rect {
        match self.terminal.size() {
            Ok(size) => Rect::new(0, 0, size.width.max(1), size.height),
            Err(_) => Rect::new(0, 0, 80, 24),
        }
    }

    /// Apply every worker outcome that has arrived. Returns `true` if any did.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        for outcome in self.services.fetcher.drain() {
            self.app_state.apply_page(&outcome.ticket, outcome.result);
            changed = true;
        }
        if let Some(previews) = &self.services.previews {
            for outcome in previews.drain() {
                self.app_state.apply_preview(outcome.key, outcome.result);
                changed = true;
            }
        }
        if let Some(images) = &self.services.images {
            for check in images.drain() {
                self.app_state.apply_image_check(check.url, check.reachable);
                changed = true;
            }
        }
        if changed {
            self.request_lazy_fetches();
        }
        changed
    }

    /// Block until no page request is in flight.
    pub fn settle(&mut self) {
        while self.app_state.accumulator.is_loading() {
            match self.services.fetcher.recv() {
                Ok(outcome) => self.app_state.apply_page(&outcome.ticket, outcome.result),
                Err(err) => {
                    error!(error = %err, "Fetch worker gone while waiting");
                    break;
                }
            }
        }
        self.request_lazy_fetches();
    }

    fn perform_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.perform(effect);
        }
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::Fetch(ticket) => {
                debug!(generation = ticket.generation, cursor = ?ticket.cursor, "Requesting page");
                if let Err(err) = self.services.fetcher.request(ticket.clone()) {
                    self.app_state.apply_page(&ticket, Err(err));
                }
            }
            Effect::Submit(intent) => {
                let result = self
                    .services
                    .pipeline
                    .submit(&intent)
                    .map_err(|err| {
                        error!(error = %err, "Transfer pipeline rejected intent");
                        err.to_string()
                    });
                self.app_state.finish_submit(&intent, result);
            }
            Effect::OpenLink(url) => {
                if let Err(err) = (self.services.open_link)(&url) {
                    warn!(url = %url, error = %err, "Failed to open link");
                    self.app_state.status_message = Some(format!("Could not open {url}"));
                }
            }
            Effect::Quit => self.running = false,
        }
    }

    /// Queue the preview and image checks the current view needs.
    fn request_lazy_fetches(&mut self) {
        if let Some(previews) = &self.services.previews {
            if let Some(item) = self.app_state.take_preview_request() {
                previews.request(item);
            }
        }
        if let Some(images) = &self.services.images {
            for url in self.app_state.take_image_checks() {
                images.request(url);
            }
        }
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let areas = compute_areas(self.frame_area(), &self.app_state);
        self.app_state
            .set_viewport_rows(areas.grid_body().height.max(1) as usize);

        let state = &self.app_state;
        let styles = &self.styles;
        let mut columns = None;
        self.terminal.draw(|frame| {
            columns = Some(render_layout(frame, state, styles));
        })?;
        self.last_columns = columns;
        Ok(())
    }

    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub fn app_state_mut(&mut self) -> &mut AppState {
        &mut self.app_state
    }

    /// Column geometry from the last draw.
    pub fn columns(&self) -> Option<&ColumnLayout> {
        self.last_columns.as_ref()
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Run the TUI until the user quits.
///
/// Handles terminal setup and always restores the terminal, even on error.
/// Logging must be initialized by the caller.
pub fn run(
    app_state: AppState,
    services: Services,
    key_bindings: KeyBindings,
    styles: TableStyles,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(app_state, services, key_bindings, styles)?;
    let result = app.run();
    restore_terminal()?;
    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
pub fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
