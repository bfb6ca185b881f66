use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{BlockModel, GapPolicy, RateSeries, reference_line};
use crate::errors::{AppError, AppResult};
use crate::export::SeriesExport;
use crate::store::EventLog;
use crate::ui::messages::{header, info, warning};
use crate::utils::table::{Column, Table};
use crate::utils::time::minutes;
use std::io;

/// Rates per fixed block, as a table or CSV on stdout.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Series {
        block,
        skip_gaps,
        csv: as_csv,
    } = cmd
    {
        let path = cfg.log_path();
        if !path.exists() {
            warning(format!("No events recorded yet ({})", path.display()));
            return Ok(());
        }

        let block = block
            .map(|m| minutes(m.max(1)))
            .unwrap_or_else(|| cfg.session_options().block);
        let policy = if *skip_gaps {
            GapPolicy::Skip
        } else {
            cfg.gap_policy()
        };

        let events = EventLog::load(&path)?;
        let model = BlockModel::from_events(block, policy, &events)?;
        let series = RateSeries::new(&model);

        if *as_csv {
            let rates: Vec<_> = model.rates().collect();
            let mut wtr = csv::Writer::from_writer(io::stdout());
            for row in SeriesExport::from_rates(&rates) {
                wtr.serialize(row)
                    .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
            }
            wtr.flush()?;
            return Ok(());
        }

        if series.is_empty() {
            info("No blocks to show.");
            return Ok(());
        }

        header(format!(
            "{} ({} min blocks)",
            series.title(),
            block.num_minutes()
        ));

        let mut table = Table::new(vec![
            Column::right("#"),
            Column::left("START"),
            Column::right("IN/MIN"),
            Column::right("OUT/MIN"),
        ]);
        for (i, (start, in_rate, out_rate)) in series.samples().enumerate() {
            table.add_row(vec![
                i.to_string(),
                start.format("%Y-%m-%d %H:%M").to_string(),
                format!("{:.2}", in_rate * 60.0),
                format!("{:.2}", out_rate * 60.0),
            ]);
        }
        print!("{}", table.render());

        let bounds = series.bounds();
        let [_, (ref_x, ref_y)] = reference_line();
        println!();
        println!(
            "Axes: in {:.2} .. {:.2}, out {:.2} .. {:.2} per second (reference {:.0}:{:.0})",
            bounds.min_x, bounds.max_x, bounds.min_y, bounds.max_y, ref_x, ref_y
        );
    }

    Ok(())
}
