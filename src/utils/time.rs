//! Time utilities: parsing user-supplied timestamps and window lengths.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, NaiveTime, TimeDelta};

/// Parse a timestamp given on the command line.
///
/// Accepted forms:
/// - RFC 3339 (`2024-03-01T14:05:22.123-08:00`, `...Z`)
/// - `YYYY-MM-DD HH:MM[:SS]` in local time
/// - `HH:MM[:SS]` today, local time
pub fn parse_at(s: &str) -> AppResult<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    let naive = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            ["%H:%M:%S", "%H:%M"]
                .iter()
                .find_map(|f| NaiveTime::parse_from_str(s, f).ok())
                .map(|t| Local::now().date_naive().and_time(t))
        })
        .ok_or_else(|| AppError::InvalidTime(s.to_string()))?;

    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| AppError::InvalidTime(format!("{s} (does not exist in local time)")))
}

pub fn parse_optional_at(input: Option<&String>) -> AppResult<DateTime<FixedOffset>> {
    match input {
        Some(s) => parse_at(s),
        None => Ok(Local::now().fixed_offset()),
    }
}

pub fn seconds(secs: u32) -> TimeDelta {
    TimeDelta::seconds(i64::from(secs))
}

pub fn minutes(mins: u32) -> TimeDelta {
    TimeDelta::minutes(i64::from(mins))
}
