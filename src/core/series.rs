//! Chart-ready views over a [`BlockModel`]. Read-only; every query is
//! recomputed from the model's current state.

use super::blocks::{BlockModel, BlockRate};
use chrono::{DateTime, FixedOffset};

/// Smallest maximum used for either chart axis.
const LEAST_MAX: f64 = 1.0;

pub const SERIES_TITLE: &str = "Ant rates";

/// Axis bounds for a rate chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// In-rate against out-rate, one point per block.
pub struct RateSeries<'a> {
    model: &'a BlockModel,
}

impl<'a> RateSeries<'a> {
    pub fn new(model: &'a BlockModel) -> Self {
        Self { model }
    }

    pub fn title(&self) -> &'static str {
        SERIES_TITLE
    }

    pub fn len(&self) -> usize {
        self.model.len()
    }

    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }

    /// `(in_rate, out_rate)` of block `index`.
    pub fn point(&self, index: usize) -> Option<(f64, f64)> {
        self.model.rate_at(index).map(|r| (r.in_rate, r.out_rate))
    }

    /// Time-stamped sample of block `index`, for time-axis charts.
    pub fn sample(&self, index: usize) -> Option<BlockRate> {
        self.model.rate_at(index)
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + 'a {
        let model = self.model;
        model.rates().map(|r| (r.in_rate, r.out_rate))
    }

    pub fn samples(&self) -> impl Iterator<Item = (DateTime<FixedOffset>, f64, f64)> + 'a {
        let model = self.model;
        model.rates().map(|r| (r.start, r.in_rate, r.out_rate))
    }

    /// Both axes start at zero and extend to the largest value seen,
    /// never less than [`LEAST_MAX`].
    pub fn bounds(&self) -> AxisBounds {
        let (max_x, max_y) = self
            .points()
            .fold((LEAST_MAX, LEAST_MAX), |(mx, my), (x, y)| (mx.max(x), my.max(y)));
        AxisBounds {
            min_x: 0.0,
            max_x,
            min_y: 0.0,
            max_y,
        }
    }
}

/// The 1:1 line drawn behind the scatter: equal in and out traffic.
pub fn reference_line() -> [(f64, f64); 2] {
    [(0.0, 0.0), (1.0, 1.0)]
}
