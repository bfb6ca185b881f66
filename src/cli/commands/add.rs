use crate::cli::notices::ConsoleNotices;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Session;
use crate::errors::{AppError, AppResult};
use crate::models::EventType;
use crate::store::ChannelDispatcher;
use crate::ui::messages::{kind_label, success};
use crate::utils::time::parse_optional_at;

/// Record one event through a short-lived session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { kind, at } = cmd {
        //
        // 1. Parse kind + time
        //
        let kind =
            EventType::et_from_str(kind).ok_or_else(|| AppError::InvalidEventType(kind.clone()))?;
        let time = parse_optional_at(at.as_ref())?;

        //
        // 2. Open session (rebuilds models, starts the writer)
        //
        let (dispatcher, notices) = ChannelDispatcher::channel();
        let session = Session::open(cfg.log_path(), cfg.session_options(), dispatcher)?;

        //
        // 3. Record, then wait for the writer to drain
        //
        let event = session.record(kind, time)?;
        session.close()?;

        let mut console = ConsoleNotices::quiet();
        notices.pump_until_closed(&mut console);
        let counts = console.finish()?.unwrap_or_default();

        success(format!(
            "Recorded {} at {}",
            kind_label(event.kind()),
            event.time_str()
        ));
        success(format!(
            "Saved events: {} in, {} out",
            counts.in_count, counts.out_count
        ));
    }

    Ok(())
}
