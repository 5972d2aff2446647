//! Resolve command implementation

use std::path::Path;

use colored::Colorize;

use crate::cli::LayerArgs;
use crate::error::Result;

use super::{print_diagnostic, project_loader};

/// Run the resolve command
///
/// Prints every resolved field with the layer it came from, followed by the
/// diagnostics. Returns the process exit code.
pub fn run_resolve(cwd: &Path, args: &LayerArgs) -> Result<i32> {
    let report = project_loader(cwd, args)?.load()?.resolve()?;

    if args.json {
        println!("{}", report.to_json()?);
        return Ok(report.exit_code());
    }

    for (name, resolved) in report.config.iter() {
        println!(
            "{} = {}  {}",
            name,
            resolved.value,
            format!("({})", resolved.layer).dimmed()
        );
    }

    if !report.diagnostics.is_empty() {
        println!();
        for diagnostic in &report.diagnostics {
            print_diagnostic(diagnostic);
        }
    }

    Ok(report.exit_code())
}
