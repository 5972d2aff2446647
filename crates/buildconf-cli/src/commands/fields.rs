//! Fields command implementation

use std::path::Path;

use buildconf_core::{FieldRegistry, ProjectManifest};
use colored::Colorize;

use crate::error::Result;

use super::manifest_path;

/// Run the fields command
///
/// Lists the built-in fields followed by any declared in the manifest.
pub fn run_fields(cwd: &Path, project: Option<&Path>, json: bool) -> Result<()> {
    let extra = match manifest_path(cwd, project)? {
        Some(path) => ProjectManifest::load(&path)?.fields,
        None => Vec::new(),
    };
    let registry = FieldRegistry::with_extra_fields(extra)?;

    if json {
        println!("{}", serde_json::to_string_pretty(registry.fields())?);
        return Ok(());
    }

    println!("{}", "Known Fields".bold());
    println!();
    for field in registry.fields() {
        let default = match &field.default {
            Some(value) => value.to_string(),
            None if field.required => "(required)".to_string(),
            None => "-".to_string(),
        };
        println!(
            "  {:<36} {:<8} {}",
            field.name.green(),
            field.field_type.to_string(),
            default
        );
        if !field.description.is_empty() {
            println!("      {}", field.description.dimmed());
        }
    }
    println!();
    println!("{} {} fields", "Total:".dimmed(), registry.len());

    Ok(())
}
