//! antrecorder library root.
//! Exposes the CLI parser, the high-level run() function, and the event
//! log, writer and rate-model modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cfg, cli.test),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg),
        Commands::Undo => cli::commands::undo::handle(cfg),
        Commands::Record => cli::commands::record::handle(cfg),
        Commands::Stats { .. } => cli::commands::stats::handle(&cli.command, cfg),
        Commands::Series { .. } => cli::commands::series::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Check => cli::commands::check::handle(cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once (test mode never reads the user's file)
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    // 3️⃣ command-line overrides
    if let Some(dataset) = &cli.dataset {
        cfg.dataset = dataset.clone();
    }
    if let Some(log) = &cli.log {
        cfg.log_file = Some(log.clone());
    }

    logging::init(&cfg.log_level);

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
