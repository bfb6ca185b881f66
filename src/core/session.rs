//! One open dataset: the in-memory rate models plus the log writer.
//!
//! Every tap updates the models synchronously for display and queues the
//! same event to the writer for persistence. The models and the writer
//! never call into each other.

use super::blocks::{BlockModel, BlockRate, GapPolicy};
use super::rate::{RateWindow, Status};
use crate::errors::{AppError, AppResult};
use crate::models::{Event, EventType};
use crate::store::{Dispatcher, EventLog, FileAction, LogWriter};
use chrono::{DateTime, FixedOffset, TimeDelta};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub block: TimeDelta,
    pub gap_policy: GapPolicy,
    pub queue_warn_depth: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            block: TimeDelta::minutes(1),
            gap_policy: GapPolicy::Skip,
            queue_warn_depth: 64,
        }
    }
}

/// Both rate models, always updated together under one lock.
#[derive(Debug, Clone)]
pub struct Rates {
    pub window: RateWindow,
    pub blocks: BlockModel,
}

impl Rates {
    pub fn new(options: &SessionOptions) -> Self {
        Self {
            window: RateWindow::new(),
            blocks: BlockModel::new(options.block, options.gap_policy),
        }
    }

    pub fn from_events(options: &SessionOptions, events: &[Event]) -> AppResult<Self> {
        Ok(Self {
            window: RateWindow::from_events(events)?,
            blocks: BlockModel::from_events(options.block, options.gap_policy, events)?,
        })
    }

    pub fn add(&mut self, event: &Event) -> AppResult<()> {
        self.window.check_order(event)?;
        self.blocks.add(event)?;
        self.window.add(event)
    }

    pub fn delete_last(&mut self) -> Option<Event> {
        let removed = self.window.delete_last();
        if removed.is_some() {
            self.blocks.remove_last();
        }
        removed
    }
}

pub struct Session {
    path: PathBuf,
    options: SessionOptions,
    rates: Arc<Mutex<Rates>>,
    writer: LogWriter,
}

impl Session {
    /// Read the existing log, rebuild the models, then hand the file to a
    /// new log writer. A malformed log aborts the open.
    pub fn open(
        path: impl AsRef<Path>,
        options: SessionOptions,
        dispatcher: impl Dispatcher,
    ) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut log = EventLog::open(&path)?;
        let events = log.read_all()?;
        let rates = Rates::from_events(&options, &events)?;
        info!(path = %path.display(), events = events.len(), "session opened");

        let writer = LogWriter::spawn(log, dispatcher)?;
        Ok(Self {
            path,
            options,
            rates: Arc::new(Mutex::new(rates)),
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Shared handle for a refresh/render thread.
    pub fn rates(&self) -> Arc<Mutex<Rates>> {
        Arc::clone(&self.rates)
    }

    pub fn record(&self, kind: EventType, time: DateTime<FixedOffset>) -> AppResult<Event> {
        self.record_event(Event::new(kind, time))
    }

    pub fn record_now(&self, kind: EventType) -> AppResult<Event> {
        self.record_event(Event::now(kind))
    }

    pub fn record_event(&self, event: Event) -> AppResult<Event> {
        event.validate()?;
        if !self.writer.is_alive() {
            return Err(AppError::WriterStopped);
        }
        {
            let mut rates = self.lock()?;
            rates.add(&event)?;
            // queued while still holding the lock so the writer sees events
            // in the same order as the models
            if let Err(e) = self.writer.submit(FileAction::Append(event)) {
                rates.delete_last();
                return Err(e);
            }
        }
        debug!(kind = event.kind().et_as_str(), "recorded");
        Ok(event)
    }

    /// Remove the latest event from the models and the log. `None` (and
    /// nothing queued) when the session holds no events.
    pub fn delete_last(&self) -> AppResult<Option<Event>> {
        if !self.writer.is_alive() {
            return Err(AppError::WriterStopped);
        }
        let mut rates = self.lock()?;
        let Some(removed) = rates.delete_last() else {
            return Ok(None);
        };
        if let Err(e) = self.writer.submit(FileAction::DeleteLast) {
            // the file still holds the record; put it back in the models
            rates.add(&removed)?;
            return Err(e);
        }
        Ok(Some(removed))
    }

    pub fn count(&self, kind: EventType) -> AppResult<usize> {
        Ok(self.lock()?.window.count(kind))
    }

    pub fn rate(
        &self,
        kind: EventType,
        end: DateTime<FixedOffset>,
        duration: TimeDelta,
    ) -> AppResult<f64> {
        Ok(self.lock()?.window.rate(kind, end, duration))
    }

    pub fn status(&self, now: DateTime<FixedOffset>, window: TimeDelta) -> AppResult<Status> {
        Ok(self.lock()?.window.status(now, window))
    }

    pub fn block_rates(&self) -> AppResult<Vec<BlockRate>> {
        Ok(self.lock()?.blocks.rates().collect())
    }

    pub fn is_writer_alive(&self) -> bool {
        self.writer.is_alive()
    }

    pub fn queue_depth(&self) -> usize {
        self.writer.queue_depth()
    }

    /// `QueueOverload` when the writer backlog reaches the configured depth.
    pub fn backlog_advisory(&self) -> Option<AppError> {
        self.writer.backlog_advisory(self.options.queue_warn_depth)
    }

    /// Stop the writer after everything queued so far has been applied.
    pub fn close(self) -> AppResult<()> {
        info!(path = %self.path.display(), "closing session");
        self.writer.shutdown()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Rates>> {
        self.rates
            .lock()
            .map_err(|_| AppError::Other("rate model lock poisoned".to_string()))
    }
}
