//! Sliding-window counts and rates.

use crate::errors::{AppError, AppResult};
use crate::models::{Event, EventType};
use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::Serialize;
use std::collections::VecDeque;

/// Display summary: totals plus live rates over a trailing window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub in_count: usize,
    pub out_count: usize,
    /// `out / in`, absent until the first `In`.
    pub out_ratio: Option<f64>,
    /// Outgoing ants that have not come back.
    pub out_difference: i64,
    /// Events per second.
    pub in_rate: f64,
    pub out_rate: f64,
}

/// In and out timestamps, each kept in non-decreasing time order.
#[derive(Debug, Clone, Default)]
pub struct RateWindow {
    ins: VecDeque<DateTime<FixedOffset>>,
    outs: VecDeque<DateTime<FixedOffset>>,
    // insertion order, used only to break ties between equal tails
    order: Vec<EventType>,
}

impl RateWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a Event>) -> AppResult<Self> {
        let mut window = Self::new();
        for ev in events {
            window.add(ev)?;
        }
        Ok(window)
    }

    /// Reject `event` if it is older than the latest event held.
    pub fn check_order(&self, event: &Event) -> AppResult<()> {
        match self.latest_time() {
            Some(latest) if event.time() < latest => Err(AppError::OutOfOrderEvent {
                event: event.time().to_rfc3339(),
                latest: latest.to_rfc3339(),
            }),
            _ => Ok(()),
        }
    }

    pub fn add(&mut self, event: &Event) -> AppResult<()> {
        self.check_order(event)?;
        self.sequence_mut(event.kind()).push_back(event.time());
        self.order.push(event.kind());
        Ok(())
    }

    pub fn count(&self, kind: EventType) -> usize {
        self.sequence(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.ins.is_empty() && self.outs.is_empty()
    }

    pub fn latest_time(&self) -> Option<DateTime<FixedOffset>> {
        match (self.ins.back(), self.outs.back()) {
            (Some(i), Some(o)) => Some(*i.max(o)),
            (Some(t), None) | (None, Some(t)) => Some(*t),
            (None, None) => None,
        }
    }

    /// Events of `kind` per second over `[end - duration, end]`.
    pub fn rate(&self, kind: EventType, end: DateTime<FixedOffset>, duration: TimeDelta) -> f64 {
        let millis = duration.num_milliseconds();
        if millis <= 0 {
            return 0.0;
        }
        let start = end - duration;
        let seq = self.sequence(kind);
        let upto_end = seq.partition_point(|t| *t <= end);
        let before_start = seq.partition_point(|t| *t < start);
        let count = upto_end.saturating_sub(before_start);
        count as f64 / (millis as f64 / 1000.0)
    }

    /// Remove the chronologically latest event. `None` when empty.
    pub fn delete_last(&mut self) -> Option<Event> {
        let kind = match (self.ins.back(), self.outs.back()) {
            (None, None) => return None,
            (Some(_), None) => EventType::In,
            (None, Some(_)) => EventType::Out,
            (Some(i), Some(o)) if i > o => EventType::In,
            (Some(i), Some(o)) if o > i => EventType::Out,
            // equal tails: whichever was added last
            _ => *self.order.last()?,
        };

        let time = self.sequence_mut(kind).pop_back()?;
        if let Some(pos) = self.order.iter().rposition(|k| *k == kind) {
            self.order.remove(pos);
        }
        Some(Event::new(kind, time))
    }

    pub fn status(&self, now: DateTime<FixedOffset>, window: TimeDelta) -> Status {
        let in_count = self.count(EventType::In);
        let out_count = self.count(EventType::Out);
        Status {
            in_count,
            out_count,
            out_ratio: (in_count > 0).then(|| out_count as f64 / in_count as f64),
            out_difference: out_count as i64 - in_count as i64,
            in_rate: self.rate(EventType::In, now, window),
            out_rate: self.rate(EventType::Out, now, window),
        }
    }

    fn sequence(&self, kind: EventType) -> &VecDeque<DateTime<FixedOffset>> {
        match kind {
            EventType::In => &self.ins,
            EventType::Out => &self.outs,
        }
    }

    fn sequence_mut(&mut self, kind: EventType) -> &mut VecDeque<DateTime<FixedOffset>> {
        match kind {
            EventType::In => &mut self.ins,
            EventType::Out => &mut self.outs,
        }
    }
}
