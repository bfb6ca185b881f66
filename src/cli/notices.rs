//! Console side of the log writer's notice channel.

use crate::errors::{AppError, AppResult};
use crate::store::{Counts, NoticeHandler};
use crate::ui::messages::error;

/// Collects notices drained on the main thread.
///
/// With `echo` on, write errors are printed as they arrive (interactive
/// use); otherwise the first one is handed back by [`finish`](Self::finish).
pub struct ConsoleNotices {
    echo: bool,
    counts: Option<Counts>,
    errors: Vec<AppError>,
}

impl ConsoleNotices {
    pub fn quiet() -> Self {
        Self {
            echo: false,
            counts: None,
            errors: Vec::new(),
        }
    }

    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::quiet()
        }
    }

    /// Last counts confirmed by the writer.
    pub fn counts(&self) -> Option<Counts> {
        self.counts
    }

    pub fn finish(mut self) -> AppResult<Option<Counts>> {
        if self.errors.is_empty() {
            return Ok(self.counts);
        }
        if self.echo {
            return Err(AppError::Other(format!(
                "{} log write error(s) reported",
                self.errors.len()
            )));
        }
        let first = self.errors.remove(0);
        for e in &self.errors {
            error(e);
        }
        Err(first)
    }
}

impl NoticeHandler for ConsoleNotices {
    fn on_counts_changed(&mut self, counts: Counts) {
        self.counts = Some(counts);
    }

    fn on_error(&mut self, err: AppError) {
        if self.echo {
            error(format!("Log write failed: {err}"));
        }
        self.errors.push(err);
    }
}
