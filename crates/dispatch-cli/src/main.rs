//! Dispatch CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use dispatch_cli::cli::Cli;
use dispatch_cli::commands;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = cli.format;
    let command = cli.command.unwrap_or_default();

    if let Err(e) = commands::execute(command, format) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
