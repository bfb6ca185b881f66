use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for antrecorder
/// Tally ants going in and out of a nest, with a durable event log
#[derive(Parser)]
#[command(
    name = "antrecorder",
    version = env!("CARGO_PKG_VERSION"),
    about = "Tally ant arrivals and departures into a durable event log, with live counts and rates",
    long_about = None
)]
pub struct Cli {
    /// Override the event log path (useful for tests or one-off files)
    #[arg(global = true, long = "log", value_name = "PATH")]
    pub log: Option<String>,

    /// Dataset name; selects `<data_dir>/Ant events <NAME>.csv`
    #[arg(global = true, long = "dataset", short = 'd', value_name = "NAME")]
    pub dataset: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration and data directories
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Record a single event
    Add {
        /// Event type: in | out
        kind: String,

        #[arg(
            long = "at",
            help = "Event time (RFC 3339, 'YYYY-MM-DD HH:MM[:SS]' or 'HH:MM[:SS]'); default: now"
        )]
        at: Option<String>,
    },

    /// Delete the most recent event
    Undo,

    /// Interactive tally: i = in, o = out, u = undo, s = status, q = quit
    Record,

    /// Show counts, out/in ratio and current rates
    Stats {
        #[arg(long = "at", help = "End of the rate window; default: now")]
        at: Option<String>,

        #[arg(long = "window", value_name = "SECS", help = "Rate window length in seconds")]
        window: Option<u32>,
    },

    /// Show in/out rates per fixed time block
    Series {
        #[arg(long = "block", value_name = "MIN", help = "Block length in minutes")]
        block: Option<u32>,

        #[arg(long = "skip-gaps", help = "Do not insert empty blocks for idle periods")]
        skip_gaps: bool,

        #[arg(long = "csv", help = "Print the series as CSV")]
        csv: bool,
    },

    /// List recorded events
    List {
        #[arg(long = "last", value_name = "N", help = "Only the N most recent events")]
        last: Option<usize>,
    },

    /// Validate the event log
    Check,

    /// Export events or block rates
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Export block rates instead of raw events")]
        series: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the event log
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
