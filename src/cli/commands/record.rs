use crate::cli::notices::ConsoleNotices;
use crate::config::Config;
use crate::core::{Session, Status};
use crate::errors::{AppError, AppResult};
use crate::models::EventType;
use crate::store::{ChannelDispatcher, Counts};
use crate::ui::messages::{error, header, info, kind_label, success, tally, warning};
use crate::utils::formatting::signed;
use crate::utils::{per_minute, ratio};
use chrono::Local;
use std::io::{self, BufRead};
use std::time::Duration;

const HELP: &str = "i = in, o = out, u = undo last, s = status, q = quit";

/// Interactive tally session reading one command per line from stdin.
///
/// The rate models answer immediately; persistence happens on the writer
/// thread and its notices are drained here between commands.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let path = cfg.log_path();
    let (dispatcher, notices) = ChannelDispatcher::channel();
    let session = Session::open(&path, cfg.session_options(), dispatcher)?;
    let mut console = ConsoleNotices::echoing();

    header(format!("Recording to {}", path.display()));
    info(HELP);

    // initial counts from the writer
    notices.wait(&mut console, Duration::from_millis(500));
    tally(console.counts().unwrap_or_default());

    for line in io::stdin().lock().lines() {
        let line = line?;
        let command = line.trim().to_lowercase();

        match command.as_str() {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "u" | "undo" => match session.delete_last()? {
                Some(ev) => info(format!("Deleted {} at {}", kind_label(ev.kind()), ev.time_str())),
                None => info("Nothing to delete."),
            },
            "s" | "status" => {
                print_status(&session.status(Local::now().fixed_offset(), cfg.rate_window())?)
            }
            "h" | "help" | "?" => info(HELP),
            other => match EventType::et_from_str(other) {
                Some(kind) => match session.record_now(kind) {
                    Ok(_) => {}
                    Err(AppError::WriterStopped) => return Err(AppError::WriterStopped),
                    Err(e) => error(e),
                },
                None => warning(format!("Unknown command '{other}' ({HELP})")),
            },
        }

        tally(Counts {
            in_count: session.count(EventType::In)?,
            out_count: session.count(EventType::Out)?,
        });

        if let Some(advice) = session.backlog_advisory() {
            warning(advice);
        }
        notices.drain(&mut console);
        if !session.is_writer_alive() {
            return Err(AppError::WriterStopped);
        }
    }

    session.close()?;
    notices.pump_until_closed(&mut console);
    let saved = console.finish()?.unwrap_or_default();
    success(format!(
        "Saved events: {} in, {} out",
        saved.in_count, saved.out_count
    ));

    Ok(())
}

pub(crate) fn print_status(status: &Status) {
    println!("In count:        {}", status.in_count);
    println!("Out count:       {}", status.out_count);
    println!("Out/in ratio:    {}", ratio(status.out_ratio));
    println!("Out - in:        {}", signed(status.out_difference));
    println!("In rate:         {}", per_minute(status.in_rate));
    println!("Out rate:        {}", per_minute(status.out_rate));
}
