//! Unified application error type.
//! All modules (store, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Log file contents
    // ---------------------------
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    // ---------------------------
    // Rate model / session
    // ---------------------------
    #[error("Event at {event} is older than the latest recorded event ({latest})")]
    OutOfOrderEvent { event: String, latest: String },

    #[error("Log writer is falling behind: {depth} actions queued (limit {limit})")]
    QueueOverload { depth: usize, limit: usize },

    #[error("Log writer is not running; the action was not queued")]
    WriterStopped,

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid event type: {0}")]
    InvalidEventType(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Line number of a decode failure, if this is one.
    pub fn line_number(&self) -> Option<usize> {
        match self {
            AppError::MalformedRecord { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
