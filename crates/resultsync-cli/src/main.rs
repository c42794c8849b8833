//! resultsync CLI
//!
//! Command-line interface for diffing sectioned result sets

use clap::{Parser, Subcommand};

mod commands;
mod store;

#[derive(Debug, Parser)]
#[command(name = "resultsync")]
#[command(about = "resultsync - Sectioned result list reconciliation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diff two record files and print the edit script
    Diff(commands::diff::DiffArgs),
    /// Run one reconciliation cycle per record file and print delegate callbacks
    Sync(commands::sync::SyncArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Sync(args) => commands::sync::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
