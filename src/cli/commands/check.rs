use crate::config::Config;
use crate::core::RateWindow;
use crate::errors::AppResult;
use crate::store::{Counts, EventLog};
use crate::ui::messages::{success, warning};

/// Decode every record and verify time order.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let path = cfg.log_path();
    if !path.exists() {
        warning(format!("No events recorded yet ({})", path.display()));
        return Ok(());
    }

    let events = EventLog::load(&path)?;
    RateWindow::from_events(&events)?;

    let counts = Counts::tally(&events);
    success(format!(
        "{} records OK ({} in, {} out)",
        counts.total(),
        counts.in_count,
        counts.out_count
    ));
    Ok(())
}
