//! Verdoc CLI - versioned documentation resolver.
//!
//! Provides commands for:
//! - `resolve`: Resolve the site and write the registry JSON
//! - `check`: Validate the site without writing output

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ResolveArgs};
use output::Output;

/// Verdoc - versioned documentation resolver.
#[derive(Parser)]
#[command(name = "verdoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the site and write the registry JSON.
    Resolve(ResolveArgs),
    /// Validate the site without writing output.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Resolve(args) => args.verbose,
        Commands::Check(args) => args.verbose,
    };

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Resolve(args) => args.execute(&output),
        Commands::Check(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
