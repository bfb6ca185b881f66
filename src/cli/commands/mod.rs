pub mod add;
pub mod backup;
pub mod check;
pub mod config;
pub mod export;
pub mod init;
pub mod list;
pub mod record;
pub mod series;
pub mod stats;
pub mod undo;
