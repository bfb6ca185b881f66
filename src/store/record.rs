//! One event per line: `<timestamp>,<In|Out>\n`.

use crate::errors::{AppError, AppResult};
use crate::models::{Event, EventType};
use chrono::DateTime;

/// Fixed-width ISO-8601 profile with millisecond precision and offset,
/// e.g. `2024-03-01T14:05:22.123-08:00`.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

pub const FIELD_SEPARATOR: char = ',';

/// Encode an event as a newline-terminated record.
pub fn encode(event: &Event) -> String {
    format!(
        "{}{}{}\n",
        event.time().format(TIME_FORMAT),
        FIELD_SEPARATOR,
        event.kind().to_record_str()
    )
}

/// Decode a single record line (without its trailing newline).
///
/// `line_number` is 1-based and is carried in the error for diagnostics.
pub fn decode(line: &str, line_number: usize) -> AppResult<Event> {
    let malformed = |reason: String| AppError::MalformedRecord {
        line: line_number,
        reason,
    };

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != 2 {
        return Err(malformed(format!(
            "expected two comma-separated fields, found {}",
            fields.len()
        )));
    }

    let kind = EventType::from_record_str(fields[1])
        .ok_or_else(|| malformed(format!("invalid event type '{}'", fields[1])))?;

    let time = DateTime::parse_from_rfc3339(fields[0])
        .map_err(|e| malformed(format!("invalid timestamp '{}': {}", fields[0], e)))?;

    Ok(Event::new(kind, time))
}
