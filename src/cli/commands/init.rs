use crate::config::Config;
use crate::errors::AppResult;
use crate::store::EventLog;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// Creates the config directory and file (skipped in test mode), the data
/// directory, and an empty event log for the selected dataset.
pub fn handle(cfg: &Config, is_test: bool) -> AppResult<()> {
    let log_path = cfg.init_all(is_test)?;

    info("Initializing antrecorder…");
    if !is_test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🐜 Event log   : {}", log_path.display());

    let log = EventLog::open(&log_path)?;
    let counts = log_counts(log)?;

    success(format!(
        "Event log ready at {} ({} events)",
        log_path.display(),
        counts
    ));
    Ok(())
}

fn log_counts(mut log: EventLog) -> AppResult<usize> {
    let total = log.counts()?.total();
    log.close()?;
    Ok(total)
}
