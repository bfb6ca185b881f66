use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::{Counts, EventLog};
use crate::ui::messages::{kind_label, tally, warning};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { last } = cmd {
        let path = cfg.log_path();
        if !path.exists() {
            warning(format!("No events recorded yet ({})", path.display()));
            return Ok(());
        }

        let events = EventLog::load(&path)?;
        if events.is_empty() {
            println!("No events.");
            return Ok(());
        }

        let skip = last.map_or(0, |n| events.len().saturating_sub(n));

        let mut table = Table::new(vec![
            Column::right("#"),
            Column::left("TIME"),
            Column::left("TYPE"),
        ]);
        for (i, ev) in events.iter().enumerate().skip(skip) {
            table.add_row(vec![
                (i + 1).to_string(),
                ev.time_str(),
                ev.kind().to_record_str().to_string(),
            ]);
        }
        print!("{}", table.render());
        println!();

        let counts = Counts::tally(&events);
        tally(counts);
        if let Some(ev) = events.last() {
            println!("Latest: {} at {}", kind_label(ev.kind()), ev.time_str());
        }
    }

    Ok(())
}
