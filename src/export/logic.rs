// src/export/logic.rs

use crate::core::{BlockModel, GapPolicy};
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{EventExport, SeriesExport};
use crate::store::EventLog;
use crate::ui::messages::warning;
use chrono::TimeDelta;
use std::path::Path;

/// What to export from a dataset log.
#[derive(Debug, Clone, Copy)]
pub enum ExportContent {
    Events,
    Series { block: TimeDelta, policy: GapPolicy },
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export a dataset log.
    ///
    /// - `format`: csv | json
    /// - `file`: output path (existing files need `force` or confirmation)
    /// - `content`: raw events, or fixed-block rates
    pub fn export(
        log_path: &Path,
        format: ExportFormat,
        file: &str,
        content: ExportContent,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let events = EventLog::load(log_path)?;
        if events.is_empty() {
            warning("No events found in the selected dataset.");
            return Ok(());
        }

        match content {
            ExportContent::Events => {
                let rows = EventExport::from_events(&events);
                write_rows(&rows, format, path)
            }
            ExportContent::Series { block, policy } => {
                let model = BlockModel::from_events(block, policy, &events)?;
                let rates: Vec<_> = model.rates().collect();
                let rows = SeriesExport::from_rates(&rates);
                write_rows(&rows, format, path)
            }
        }
    }
}

fn write_rows<T: serde::Serialize>(rows: &[T], format: ExportFormat, path: &Path) -> AppResult<()> {
    match format {
        ExportFormat::Csv => export_csv(rows, path),
        ExportFormat::Json => export_json(rows, path),
    }
}
