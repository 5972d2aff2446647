//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// buildconf - Resolve and validate layered build configuration
#[derive(Parser, Debug)]
#[command(name = "buildconf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Merge all layers and print the resolved configuration
    ///
    /// Layers are applied in order: registry defaults, global defaults,
    /// manifest layers, --layer files, then --set values.
    ///
    /// Examples:
    ///   buildconf resolve                          # Use ./buildconf.toml if present
    ///   buildconf resolve -l flavors/prod.toml     # Add a layer file
    ///   buildconf resolve -s minSdk=24 --json      # Override one field, JSON output
    Resolve(LayerArgs),

    /// Merge all layers and print only the diagnostics
    Check(LayerArgs),

    /// List the known fields with their types and defaults
    Fields {
        /// Project manifest declaring extra fields
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

/// Inputs shared by `resolve` and `check`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LayerArgs {
    /// Project manifest (defaults to ./buildconf.toml when present)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Extra layer file, applied after the manifest layers (repeatable)
    #[arg(short, long = "layer", value_name = "FILE")]
    pub layers: Vec<PathBuf>,

    /// Explicit field value, applied last (repeatable)
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Ignore the user-global defaults file
    #[arg(long)]
    pub no_global: bool,

    /// Treat warnings as errors
    #[arg(long)]
    pub warnings_as_errors: bool,

    /// Output as JSON for scripting
    #[arg(long)]
    pub json: bool,
}
