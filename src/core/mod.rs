pub mod backup;
pub mod blocks;
pub mod rate;
pub mod series;
pub mod session;

pub use blocks::{BlockModel, BlockRate, GapPolicy};
pub use rate::{RateWindow, Status};
pub use series::{AxisBounds, RateSeries, reference_line};
pub use session::{Rates, Session, SessionOptions};
