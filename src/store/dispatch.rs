//! Delivery of log writer results to the consumer.
//!
//! The writer never touches consumer state. It hands every [`LogNotice`] to
//! an injected [`Dispatcher`]; the consumer decides on which thread the
//! notice is finally handled.

use super::event_log::Counts;
use crate::errors::AppError;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

#[derive(Debug)]
pub enum LogNotice {
    CountsChanged(Counts),
    Failed(AppError),
}

/// Injected delivery interface used by the log writer thread.
pub trait Dispatcher: Send + 'static {
    fn dispatch(&self, notice: LogNotice);
}

impl<F> Dispatcher for F
where
    F: Fn(LogNotice) + Send + 'static,
{
    fn dispatch(&self, notice: LogNotice) {
        self(notice)
    }
}

/// Consumer-side callbacks.
pub trait NoticeHandler {
    fn on_counts_changed(&mut self, counts: Counts);
    fn on_error(&mut self, error: AppError);
}

/// Forwards notices over a channel to a [`NoticeQueue`].
pub struct ChannelDispatcher {
    tx: Sender<LogNotice>,
}

impl ChannelDispatcher {
    pub fn channel() -> (Self, NoticeQueue) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, NoticeQueue { rx })
    }
}

impl Dispatcher for ChannelDispatcher {
    fn dispatch(&self, notice: LogNotice) {
        // the consumer went away; nobody is left to tell
        let _ = self.tx.send(notice);
    }
}

/// Receiving end drained on the consumer's own thread.
pub struct NoticeQueue {
    rx: Receiver<LogNotice>,
}

impl NoticeQueue {
    /// Handle every notice already delivered. Never blocks.
    pub fn drain(&self, handler: &mut impl NoticeHandler) -> usize {
        let mut handled = 0;
        loop {
            match self.rx.try_recv() {
                Ok(notice) => {
                    deliver(handler, notice);
                    handled += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        handled
    }

    /// Wait up to `timeout` for one notice. Returns false on timeout or
    /// when the writer has gone away.
    pub fn wait(&self, handler: &mut impl NoticeHandler, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(notice) => {
                deliver(handler, notice);
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Handle notices until the writer (and every other sender) is gone.
    pub fn pump_until_closed(&self, handler: &mut impl NoticeHandler) -> usize {
        let mut handled = 0;
        while let Ok(notice) = self.rx.recv() {
            deliver(handler, notice);
            handled += 1;
        }
        handled
    }
}

fn deliver(handler: &mut impl NoticeHandler, notice: LogNotice) {
    match notice {
        LogNotice::CountsChanged(counts) => handler.on_counts_changed(counts),
        LogNotice::Failed(error) => handler.on_error(error),
    }
}
