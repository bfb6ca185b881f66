pub mod formatting;
pub mod path;
pub mod table;
pub mod time;

pub use formatting::{per_minute, ratio};
pub use path::{dataset_file, expand_tilde};
