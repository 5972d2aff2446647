//! Command implementations for buildconf-cli

pub mod check;
pub mod fields;
pub mod resolve;

pub use check::run_check;
pub use fields::run_fields;
pub use resolve::run_resolve;

use std::path::{Path, PathBuf};

use buildconf_core::{Diagnostic, MANIFEST_FILE, ProjectLoader, Severity};
use colored::{ColoredString, Colorize};

use crate::cli::LayerArgs;
use crate::error::{CliError, Result};

/// Exit code for a run that hit a fatal error
pub const EXIT_FATAL: i32 = 2;

/// The manifest to use: `--project`, else `./buildconf.toml` when it exists
pub(crate) fn manifest_path(cwd: &Path, project: Option<&Path>) -> Result<Option<PathBuf>> {
    match project {
        Some(path) => {
            let path = cwd.join(path);
            if !path.is_file() {
                return Err(CliError::user(format!(
                    "Project manifest not found: {}",
                    path.display()
                )));
            }
            Ok(Some(path))
        }
        None => {
            let default = cwd.join(MANIFEST_FILE);
            Ok(default.is_file().then_some(default))
        }
    }
}

/// Build the layer loader for `resolve` and `check`
pub(crate) fn project_loader(cwd: &Path, args: &LayerArgs) -> Result<ProjectLoader> {
    let mut loader = ProjectLoader::new()
        .with_layer_files(args.layers.iter().map(|p| cwd.join(p)))
        .with_assignments(args.set.iter().cloned())
        .warnings_as_errors(args.warnings_as_errors);

    if let Some(path) = manifest_path(cwd, args.project.as_deref())? {
        tracing::debug!(?path, "Using project manifest");
        loader = loader.with_manifest(path);
    }
    if args.no_global {
        loader = loader.without_global();
    }
    Ok(loader)
}

/// Print one diagnostic in its `Display` form with the severity coloured
pub(crate) fn print_diagnostic(diagnostic: &Diagnostic) {
    println!("{}: {}", styled_severity(diagnostic.severity), diagnostic.detail());
}

fn styled_severity(severity: Severity) -> ColoredString {
    let label = severity.to_string();
    match severity {
        Severity::Error => label.red().bold(),
        Severity::Warning => label.yellow().bold(),
    }
}
