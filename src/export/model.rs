// src/export/model.rs

use crate::core::BlockRate;
use crate::models::Event;
use crate::store::record::TIME_FORMAT;
use serde::Serialize;

/// Flat row for event export.
#[derive(Serialize, Clone, Debug)]
pub struct EventExport {
    pub index: usize,
    pub timestamp: String,
    pub kind: String,
}

impl EventExport {
    pub fn from_events(events: &[Event]) -> Vec<Self> {
        events
            .iter()
            .enumerate()
            .map(|(i, ev)| EventExport {
                index: i + 1,
                timestamp: ev.time().format(TIME_FORMAT).to_string(),
                kind: ev.kind().to_record_str().to_string(),
            })
            .collect()
    }
}

/// Flat row for block rate export. Rates are events per minute.
#[derive(Serialize, Clone, Debug)]
pub struct SeriesExport {
    pub block: usize,
    pub start: String,
    pub in_per_minute: f64,
    pub out_per_minute: f64,
}

impl SeriesExport {
    pub fn from_rates(rates: &[BlockRate]) -> Vec<Self> {
        rates
            .iter()
            .enumerate()
            .map(|(i, r)| SeriesExport {
                block: i,
                start: r.start.format(TIME_FORMAT).to_string(),
                in_per_minute: r.in_rate * 60.0,
                out_per_minute: r.out_rate * 60.0,
            })
            .collect()
    }
}
