use crate::models::EventType;
use crate::store::Counts;
use ansi_term::{Colour, Style};
use std::fmt;

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Blue.bold().paint(ICON_INFO), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Green.bold().paint(ICON_OK), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Yellow.bold().paint(ICON_WARN), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", Colour::Red.bold().paint(ICON_ERR), msg);
}

/// Optional: formatted section header
pub fn header<T: fmt::Display>(msg: T) {
    println!(
        "{}\n",
        Colour::Blue.bold().paint(format!("====================== {}", msg))
    );
}

/// Green for arrivals, yellow for departures (the tally button colours).
pub fn kind_label(kind: EventType) -> String {
    let style = match kind {
        EventType::In => Style::new().fg(Colour::Green).bold(),
        EventType::Out => Style::new().fg(Colour::Yellow).bold(),
    };
    style.paint(kind.to_record_str()).to_string()
}

/// One-line running tally.
pub fn tally(counts: Counts) {
    println!(
        "🐜 {} {:>5}   {} {:>5}",
        kind_label(EventType::In),
        counts.in_count,
        kind_label(EventType::Out),
        counts.out_count
    );
}
