//! Check command implementation

use std::path::Path;

use colored::Colorize;

use crate::cli::LayerArgs;
use crate::error::Result;

use super::{print_diagnostic, project_loader};

/// Run the check command
///
/// Prints only the diagnostics and a one-line summary. Returns the process
/// exit code.
pub fn run_check(cwd: &Path, args: &LayerArgs) -> Result<i32> {
    let report = project_loader(cwd, args)?.load()?.resolve()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.diagnostics)?);
        return Ok(report.exit_code());
    }

    for diagnostic in &report.diagnostics {
        print_diagnostic(diagnostic);
    }

    let summary = format!(
        "{} error(s), {} warning(s)",
        report.error_count(),
        report.warning_count()
    );
    if report.is_success() {
        println!("{} {}", "OK".green().bold(), summary);
    } else {
        println!("{} {}", "FAILED".red().bold(), summary);
    }

    Ok(report.exit_code())
}
