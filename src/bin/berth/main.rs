//! Berth CLI - package-root registry and build-target emitter

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("berth=debug")
    } else {
        EnvFilter::new("berth=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let color = !cli.no_color;

    // Execute command
    match cli.command {
        Commands::Check(args) => commands::check::execute(args, color),
        Commands::Emit(args) => commands::emit::execute(args),
        Commands::Plan(args) => commands::plan::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
