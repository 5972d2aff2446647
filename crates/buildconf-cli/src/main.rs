//! buildconf CLI
//!
//! Resolves layered build configuration and reports validation findings.
//!
//! Exit codes: 0 when the configuration is usable, 1 when a blocking
//! diagnostic was reported, 2 when the run could not complete.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use commands::EXIT_FATAL;
use error::Result;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(EXIT_FATAL);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            eprintln!("{}: tracing subscriber already set", "warning".yellow().bold());
        }
        tracing::debug!("Verbose mode enabled");
    }

    let cwd = std::env::current_dir()?;
    match cli.command {
        Commands::Resolve(args) => commands::run_resolve(&cwd, &args),
        Commands::Check(args) => commands::run_check(&cwd, &args),
        Commands::Fields { project, json } => {
            commands::run_fields(&cwd, project.as_deref(), json)?;
            Ok(0)
        }
    }
}
