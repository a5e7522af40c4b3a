//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use tracing::Level;

/// Dispatch - feed prioritized commands through a dispatch queue
#[derive(Parser, Debug)]
#[command(name = "dispatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format (text, json)
    #[arg(
        short,
        long,
        default_value = "text",
        env = "DISPATCH_FORMAT",
        global = true
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Default, PartialEq, Eq)]
pub enum Commands {
    /// Push the built-in sample sequence and print the dispatch order
    #[default]
    Demo,

    /// Push JSON records in argument order and print the dispatch order
    Drain {
        /// Records such as '{"command": "build", "priority": 5}'
        #[arg(required = true)]
        records: Vec<String>,
    },
}

/// Output format for drained commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One command per line, strings unquoted
    #[default]
    Text,
    /// A single JSON array
    Json,
}

/// Log levels selected by repeated `-v`, saturating at the last one.
const VERBOSITY_LEVELS: [Level; 4] = [Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE];

impl Cli {
    /// Level used when `RUST_LOG` is unset; trace output shows queue placement.
    pub fn log_level(&self) -> Level {
        let index = usize::from(self.verbose).min(VERBOSITY_LEVELS.len() - 1);
        VERBOSITY_LEVELS[index]
    }
}
