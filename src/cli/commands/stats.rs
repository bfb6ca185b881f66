use crate::cli::commands::record::print_status;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::RateWindow;
use crate::errors::AppResult;
use crate::store::EventLog;
use crate::ui::messages::{header, warning};
use crate::utils::time::{parse_optional_at, seconds};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { at, window } = cmd {
        let path = cfg.log_path();
        if !path.exists() {
            warning(format!("No events recorded yet ({})", path.display()));
            return Ok(());
        }

        let end = parse_optional_at(at.as_ref())?;
        let window = window.map(|w| seconds(w.max(1))).unwrap_or_else(|| cfg.rate_window());

        let events = EventLog::load(&path)?;
        let model = RateWindow::from_events(&events)?;

        header(format!(
            "{} (rates over {}s ending {})",
            path.display(),
            window.num_seconds(),
            end.format("%Y-%m-%d %H:%M:%S")
        ));
        print_status(&model.status(end, window));
    }

    Ok(())
}
