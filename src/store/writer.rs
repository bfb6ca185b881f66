//! Single-writer log thread.
//!
//! A `LogWriter` owns the [`EventLog`] for its whole life and applies
//! [`FileAction`]s strictly in the order they were submitted. Results go
//! out through the injected [`Dispatcher`], one notice per state change.

use super::action::FileAction;
use super::dispatch::{Dispatcher, LogNotice};
use super::event_log::{Counts, EventLog};
use crate::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info, warn};

#[derive(Debug, Default)]
struct WriterState {
    alive: AtomicBool,
    depth: AtomicUsize,
}

/// Clears the liveness flag however the thread exits.
struct AliveGuard(Arc<WriterState>);

impl Drop for AliveGuard {
    fn drop(&mut self) {
        self.0.alive.store(false, Ordering::SeqCst);
    }
}

/// Producer handle for the log writer thread.
pub struct LogWriter {
    tx: Sender<FileAction>,
    state: Arc<WriterState>,
    path: PathBuf,
    thread: Option<JoinHandle<()>>,
}

impl LogWriter {
    /// Start the writer thread. It publishes the initial counts, then
    /// waits for actions.
    pub fn spawn(log: EventLog, dispatcher: impl Dispatcher) -> AppResult<Self> {
        let (tx, rx) = mpsc::channel();
        let state = Arc::new(WriterState::default());
        // alive from the moment the handle exists, so producers never
        // race the thread start-up
        state.alive.store(true, Ordering::SeqCst);

        let path = log.path().to_path_buf();
        let thread_state = Arc::clone(&state);
        let thread = thread::Builder::new()
            .name("antrecorder-log-writer".to_string())
            .spawn(move || run(log, rx, dispatcher, thread_state))?;

        Ok(Self {
            tx,
            state,
            path,
            thread: Some(thread),
        })
    }

    /// Queue an action without blocking.
    pub fn submit(&self, action: FileAction) -> AppResult<()> {
        self.state.depth.fetch_add(1, Ordering::SeqCst);
        self.tx.send(action).map_err(|_| {
            self.state.depth.fetch_sub(1, Ordering::SeqCst);
            AppError::WriterStopped
        })
    }

    /// Whether the writer thread is still consuming its queue.
    pub fn is_alive(&self) -> bool {
        self.state.alive.load(Ordering::SeqCst)
    }

    /// Actions submitted but not yet taken off the queue.
    pub fn queue_depth(&self) -> usize {
        self.state.depth.load(Ordering::SeqCst)
    }

    /// Advisory only: `QueueOverload` once the backlog reaches `limit`.
    pub fn backlog_advisory(&self, limit: usize) -> Option<AppError> {
        let depth = self.queue_depth();
        (limit > 0 && depth >= limit).then_some(AppError::QueueOverload { depth, limit })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Queue `Shutdown` and wait for the thread to finish.
    pub fn shutdown(mut self) -> AppResult<()> {
        self.stop()
    }

    fn stop(&mut self) -> AppResult<()> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        // a dead writer has already closed its file; just reap the thread
        let _ = self.submit(FileAction::Shutdown);
        thread
            .join()
            .map_err(|_| AppError::Other("log writer thread panicked".to_string()))
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            error!("{e}");
        }
    }
}

fn run(
    mut log: EventLog,
    rx: Receiver<FileAction>,
    dispatcher: impl Dispatcher,
    state: Arc<WriterState>,
) {
    let _guard = AliveGuard(Arc::clone(&state));
    info!(path = %log.path().display(), "log writer started");

    let mut counts = match log.counts() {
        Ok(c) => {
            dispatcher.dispatch(LogNotice::CountsChanged(c));
            c
        }
        Err(e) => {
            error!("initial count failed: {e}");
            dispatcher.dispatch(LogNotice::Failed(e));
            Counts::default()
        }
    };

    // every sender dropped counts as an implicit shutdown
    while let Ok(action) = rx.recv() {
        state.depth.fetch_sub(1, Ordering::SeqCst);
        debug!(action = action.name(), "applying");

        match action {
            FileAction::Append(event) => match log.append(&event) {
                Ok(()) => {
                    counts.bump(event.kind());
                    dispatcher.dispatch(LogNotice::CountsChanged(counts));
                }
                Err(e) => {
                    warn!("append failed: {e}");
                    dispatcher.dispatch(LogNotice::Failed(e));
                }
            },
            FileAction::DeleteLast => {
                // the removed record may have been In or Out; re-derive
                match log.truncate_last().and_then(|_| log.counts()) {
                    Ok(c) => {
                        counts = c;
                        dispatcher.dispatch(LogNotice::CountsChanged(counts));
                    }
                    Err(e) => {
                        warn!("delete last failed: {e}");
                        dispatcher.dispatch(LogNotice::Failed(e));
                    }
                }
            }
            FileAction::Shutdown => break,
        }
    }
    // refuse new actions before the liveness flag drops
    drop(rx);

    if let Err(e) = log.close() {
        error!("close failed: {e}");
        dispatcher.dispatch(LogNotice::Failed(e));
    }
    info!("log writer stopped");
}
