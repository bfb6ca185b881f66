use crate::models::Event;

/// Work item for the log writer. Each action is consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    /// Append the event as a new record.
    Append(Event),
    /// Remove the most recently applied record.
    DeleteLast,
    /// Stop the writer. Anything queued behind it is never applied.
    Shutdown,
}

impl FileAction {
    pub fn name(&self) -> &'static str {
        match self {
            FileAction::Append(_) => "append",
            FileAction::DeleteLast => "delete_last",
            FileAction::Shutdown => "shutdown",
        }
    }
}
