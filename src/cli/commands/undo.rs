use crate::cli::notices::ConsoleNotices;
use crate::config::Config;
use crate::core::Session;
use crate::errors::AppResult;
use crate::store::ChannelDispatcher;
use crate::ui::messages::{info, kind_label, success};

/// Delete the most recent event from the log.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let (dispatcher, notices) = ChannelDispatcher::channel();
    let session = Session::open(cfg.log_path(), cfg.session_options(), dispatcher)?;

    let removed = session.delete_last()?;
    session.close()?;

    let mut console = ConsoleNotices::quiet();
    notices.pump_until_closed(&mut console);
    let counts = console.finish()?.unwrap_or_default();

    match removed {
        Some(ev) => success(format!(
            "Deleted {} at {}",
            kind_label(ev.kind()),
            ev.time_str()
        )),
        None => info("Nothing to delete."),
    }
    success(format!(
        "Saved events: {} in, {} out",
        counts.in_count, counts.out_count
    ));

    Ok(())
}
