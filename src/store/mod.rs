pub mod action;
pub mod dispatch;
pub mod event_log;
pub mod record;
pub mod writer;

pub use action::FileAction;
pub use dispatch::{ChannelDispatcher, Dispatcher, LogNotice, NoticeHandler, NoticeQueue};
pub use event_log::{Counts, EventLog};
pub use writer::LogWriter;
