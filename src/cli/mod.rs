pub mod commands;
pub mod notices;
pub mod parser;
