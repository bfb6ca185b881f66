//! Fixed-length time blocks for rate series.
//!
//! The first block starts at the first event's timestamp; every later block
//! starts a whole number of block lengths after it. Each block caches its
//! own in/out counts.

use crate::errors::{AppError, AppResult};
use crate::models::{Event, EventType};
use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::Serialize;
use std::collections::VecDeque;

/// What to do with idle periods between two events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// Jump straight to the block holding the new event.
    #[default]
    Skip,
    /// Insert empty blocks so the series is evenly spaced.
    Backfill,
}

#[derive(Debug, Clone)]
struct Block {
    start: DateTime<FixedOffset>,
    events: Vec<Event>,
    in_count: usize,
    out_count: usize,
}

impl Block {
    fn new(start: DateTime<FixedOffset>) -> Self {
        Self {
            start,
            events: Vec::new(),
            in_count: 0,
            out_count: 0,
        }
    }

    fn push(&mut self, event: Event) {
        match event.kind() {
            EventType::In => self.in_count += 1,
            EventType::Out => self.out_count += 1,
        }
        self.events.push(event);
    }

    fn pop(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        match event.kind() {
            EventType::In => self.in_count -= 1,
            EventType::Out => self.out_count -= 1,
        }
        Some(event)
    }
}

/// Rates of one block, in events per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockRate {
    pub start: DateTime<FixedOffset>,
    pub in_rate: f64,
    pub out_rate: f64,
}

#[derive(Debug, Clone)]
pub struct BlockModel {
    block: TimeDelta,
    policy: GapPolicy,
    blocks: VecDeque<Block>,
}

impl BlockModel {
    /// `block` must be positive; shorter values are raised to one second.
    pub fn new(block: TimeDelta, policy: GapPolicy) -> Self {
        let block = if block < TimeDelta::seconds(1) {
            TimeDelta::seconds(1)
        } else {
            block
        };
        Self {
            block,
            policy,
            blocks: VecDeque::new(),
        }
    }

    pub fn from_events<'a>(
        block: TimeDelta,
        policy: GapPolicy,
        events: impl IntoIterator<Item = &'a Event>,
    ) -> AppResult<Self> {
        let mut model = Self::new(block, policy);
        for ev in events {
            model.add(ev)?;
        }
        Ok(model)
    }

    pub fn block_duration(&self) -> TimeDelta {
        self.block
    }

    pub fn policy(&self) -> GapPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn first(&self) -> Option<&Event> {
        self.blocks.iter().find_map(|b| b.events.first())
    }

    pub fn last(&self) -> Option<&Event> {
        self.blocks.iter().rev().find_map(|b| b.events.last())
    }

    pub fn add(&mut self, event: &Event) -> AppResult<()> {
        if let Some(last) = self.last()
            && event.time() < last.time()
        {
            return Err(AppError::OutOfOrderEvent {
                event: event.time().to_rfc3339(),
                latest: last.time().to_rfc3339(),
            });
        }

        let time = event.time();
        let Some(current) = self.blocks.back_mut() else {
            let mut first = Block::new(time);
            first.push(*event);
            self.blocks.push_back(first);
            return Ok(());
        };

        let current_end = current.start + self.block;
        if time < current_end {
            current.push(*event);
            return Ok(());
        }

        // whole blocks between the end of the current block and the event
        let block_ms = self.block.num_milliseconds();
        let skipped = (time - current_end).num_milliseconds() / block_ms;
        if self.policy == GapPolicy::Backfill {
            for n in 0..skipped {
                self.blocks
                    .push_back(Block::new(current_end + TimeDelta::milliseconds(block_ms * n)));
            }
        }

        let mut target = Block::new(current_end + TimeDelta::milliseconds(block_ms * skipped));
        target.push(*event);
        self.blocks.push_back(target);
        Ok(())
    }

    /// Remove the most recent event. Blocks left empty at the end are
    /// dropped, so the last block always holds the latest event.
    pub fn remove_last(&mut self) -> Option<Event> {
        while self.blocks.back().is_some_and(|b| b.events.is_empty()) {
            self.blocks.pop_back();
        }
        let removed = self.blocks.back_mut()?.pop();
        while self.blocks.back().is_some_and(|b| b.events.is_empty()) {
            self.blocks.pop_back();
        }
        removed
    }

    /// Lazy pass over the current blocks, earliest first.
    pub fn rates(&self) -> impl Iterator<Item = BlockRate> + '_ {
        let seconds = self.block_seconds();
        self.blocks.iter().map(move |b| BlockRate {
            start: b.start,
            in_rate: b.in_count as f64 / seconds,
            out_rate: b.out_count as f64 / seconds,
        })
    }

    pub fn rate_at(&self, index: usize) -> Option<BlockRate> {
        self.rates().nth(index)
    }

    pub fn counts(&self) -> (usize, usize) {
        self.blocks
            .iter()
            .fold((0, 0), |(i, o), b| (i + b.in_count, o + b.out_count))
    }

    fn block_seconds(&self) -> f64 {
        self.block.num_milliseconds() as f64 / 1000.0
    }
}
