//! Background fetch worker.
//!
//! Requests go to a dedicated thread over an mpsc channel; outcomes come
//! back on a second channel that the event loop drains each tick. Only the
//! event loop touches application state.

use super::PageSource;
use crate::model::{FetchError, Page};
use crate::state::FetchTicket;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

/// Spawn a named worker thread applying `work` to every request.
///
/// The thread exits when the request sender is dropped or the outcome
/// receiver goes away.
pub(crate) fn spawn_worker<Req, Resp, F>(
    name: &str,
    mut work: F,
) -> std::io::Result<(Sender<Req>, Receiver<Resp>, JoinHandle<()>)>
where
    Req: Send + 'static,
    Resp: Send + 'static,
    F: FnMut(Req) -> Resp + Send + 'static,
{
    let (req_tx, req_rx) = mpsc::channel::<Req>();
    let (resp_tx, resp_rx) = mpsc::channel::<Resp>();
    let thread_name = name.to_string();
    let handle = thread::Builder::new()
        .name(thread_name.clone())
        .spawn(move || {
            for request in req_rx {
                if resp_tx.send(work(request)).is_err() {
                    break;
                }
            }
            debug!(worker = %thread_name, "Worker exiting");
        })?;
    Ok((req_tx, resp_rx, handle))
}

/// Result of one page request.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<Page, FetchError>,
}

/// Runs a [`PageSource`] on a background thread.
#[derive(Debug)]
pub struct PageFetcher {
    requests: Sender<FetchTicket>,
    outcomes: Receiver<FetchOutcome>,
    _handle: JoinHandle<()>,
}

impl PageFetcher {
    /// Move `source` onto a new worker thread.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the thread cannot be spawned.
    pub fn spawn(mut source: Box<dyn PageSource>) -> std::io::Result<Self> {
        let (requests, outcomes, handle) =
            spawn_worker("nftdeck-fetch", move |ticket: FetchTicket| {
                let result = source.fetch_page(ticket.cursor.as_ref());
                FetchOutcome { ticket, result }
            })?;
        Ok(Self {
            requests,
            outcomes,
            _handle: handle,
        })
    }

    /// Queue a request.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::WorkerDisconnected` if the worker has exited.
    pub fn request(&self, ticket: FetchTicket) -> Result<(), FetchError> {
        self.requests.send(ticket).map_err(|_| {
            error!("Fetch worker gone");
            FetchError::WorkerDisconnected
        })
    }

    /// All outcomes that arrived since the last call. Never blocks.
    pub fn drain(&self) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::new();
        loop {
            match self.outcomes.try_recv() {
                Ok(outcome) => outcomes.push(outcome),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        outcomes
    }

    /// Block until the next outcome arrives. Used by tests and headless runs.
    pub fn recv(&self) -> Result<FetchOutcome, FetchError> {
        self.outcomes
            .recv()
            .map_err(|_| FetchError::WorkerDisconnected)
    }
}
