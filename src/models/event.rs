use super::event_type::EventType;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, FixedOffset, Local, Offset, SubsecRound, TimeZone, Utc};
use serde::Serialize;

/// Years a record timestamp can hold (four digits).
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

/// One observed ant crossing.
///
/// The timestamp keeps its UTC offset and is truncated to whole
/// milliseconds, the precision of the on-disk record. Offsets are rounded
/// to whole minutes, the precision of the record's offset field.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Event {
    kind: EventType,
    time: DateTime<FixedOffset>,
}

impl Event {
    pub fn new<Tz: TimeZone>(kind: EventType, time: DateTime<Tz>) -> Self {
        let time = time.fixed_offset().trunc_subsecs(3);
        Self {
            kind,
            time: time.with_timezone(&minute_offset(time.offset())),
        }
    }

    /// Fails with `InvalidTime` when the year does not fit a record.
    pub fn validate(&self) -> AppResult<()> {
        if YEAR_RANGE.contains(&self.time.year()) {
            Ok(())
        } else {
            Err(AppError::InvalidTime(format!(
                "{} (year outside {}..={})",
                self.time.to_rfc3339(),
                YEAR_RANGE.start(),
                YEAR_RANGE.end()
            )))
        }
    }

    /// Event stamped with the current local time.
    pub fn now(kind: EventType) -> Self {
        Self::new(kind, Local::now())
    }

    pub fn kind(&self) -> EventType {
        self.kind
    }

    pub fn time(&self) -> DateTime<FixedOffset> {
        self.time
    }

    pub fn is_in(&self) -> bool {
        self.kind.is_in()
    }

    pub fn time_str(&self) -> String {
        self.time.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
    }
}

fn minute_offset(offset: &FixedOffset) -> FixedOffset {
    let secs = offset.local_minus_utc();
    if secs % 60 == 0 {
        return *offset;
    }
    let rounded = (f64::from(secs) / 60.0).round() as i32 * 60;
    FixedOffset::east_opt(rounded).unwrap_or_else(|| Utc.fix())
}
