use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportContent, ExportLogic};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        series,
        force,
    } = cmd
    {
        let content = if *series {
            ExportContent::Series {
                block: cfg.session_options().block,
                policy: cfg.gap_policy(),
            }
        } else {
            ExportContent::Events
        };

        ExportLogic::export(&cfg.log_path(), *format, file, content, *force)?;
    }
    Ok(())
}
