//! Layer stack assembly for a project
//!
//! The `ProjectLoader` collects the layers of one resolution run, in
//! precedence order:
//! 1. Registry defaults (implicit, applied by the merger)
//! 2. Global defaults (`<config_dir>/buildconf/defaults.toml`)
//! 3. Manifest layers (`[[layers]]` in buildconf.toml)
//! 4. Extra layer files (`--layer`)
//! 5. Explicit assignments (`--set KEY=VALUE`)
//!
//! Later layers override earlier ones.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::layer::{ConfigLayer, DEFAULTS_LAYER, LayerOrigin};
use crate::report::{ReportOptions, ResolutionReport, Resolver};
use crate::schema::FieldRegistry;

use super::manifest::ProjectManifest;

/// Name of the global defaults layer
pub const GLOBAL_LAYER: &str = "global";

/// Name of the layer built from `KEY=VALUE` assignments
pub const ASSIGNMENTS_LAYER: &str = "cli";

/// Names the loader gives its own layers; user layers may not take them
pub(crate) const RESERVED_LAYER_NAMES: &[&str] = &[DEFAULTS_LAYER, GLOBAL_LAYER, ASSIGNMENTS_LAYER];

/// Global defaults file name inside the global config directory
const GLOBAL_DEFAULTS_FILE: &str = "defaults.toml";

/// Where the global defaults layer comes from
#[derive(Debug, Clone)]
enum GlobalSource {
    /// Platform config directory via `dirs::config_dir()`
    Platform,
    /// Fixed directory (used for testing)
    Dir(PathBuf),
    /// No global layer
    Disabled,
}

/// Everything needed for one resolution run
#[derive(Debug)]
pub struct Project {
    pub registry: FieldRegistry,
    pub layers: Vec<ConfigLayer>,
    pub options: ReportOptions,
}

impl Project {
    /// Resolve the project's layers with the built-in checks
    pub fn resolve(self) -> Result<ResolutionReport> {
        Resolver::new(self.registry)
            .with_options(self.options)
            .resolve(&self.layers)
    }
}

/// Collects the schema and layer stack for a project
#[derive(Debug, Clone)]
pub struct ProjectLoader {
    manifest_path: Option<PathBuf>,
    global: GlobalSource,
    layer_files: Vec<PathBuf>,
    assignments: Vec<String>,
    warnings_as_errors: bool,
}

impl Default for ProjectLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectLoader {
    /// Create a loader with no manifest and the platform global directory
    ///
    /// The global config directory is:
    /// - Linux: `~/.config/buildconf/`
    /// - macOS: `~/Library/Application Support/buildconf/`
    /// - Windows: `%APPDATA%\buildconf\`
    pub fn new() -> Self {
        Self {
            manifest_path: None,
            global: GlobalSource::Platform,
            layer_files: Vec::new(),
            assignments: Vec::new(),
            warnings_as_errors: false,
        }
    }

    /// Read layers, fields and options from a manifest file
    pub fn with_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }

    /// Use a custom global config directory
    ///
    /// This is primarily useful for testing, where the real user config must
    /// not leak into results.
    pub fn with_global_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.global = GlobalSource::Dir(dir.into());
        self
    }

    /// Skip the global defaults layer
    pub fn without_global(mut self) -> Self {
        self.global = GlobalSource::Disabled;
        self
    }

    /// Append layer files applied after the manifest layers
    pub fn with_layer_files(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.layer_files.extend(files);
        self
    }

    /// Append `KEY=VALUE` assignments applied last
    pub fn with_assignments(mut self, assignments: impl IntoIterator<Item = String>) -> Self {
        self.assignments.extend(assignments);
        self
    }

    /// Force warnings to block, regardless of the manifest options
    pub fn warnings_as_errors(mut self, enabled: bool) -> Self {
        self.warnings_as_errors = enabled;
        self
    }

    /// Determine the global config directory path
    fn global_config_dir(&self) -> Option<PathBuf> {
        match &self.global {
            GlobalSource::Platform => dirs::config_dir().map(|d| d.join("buildconf")),
            GlobalSource::Dir(dir) => Some(dir.clone()),
            GlobalSource::Disabled => None,
        }
    }

    /// Load the manifest and every layer file
    ///
    /// Missing global defaults are skipped. Missing manifest or layer files,
    /// invalid TOML and unknown `--set` keys are errors, as are layer files
    /// whose stem is a reserved or already used layer name.
    pub fn load(&self) -> Result<Project> {
        let manifest = match &self.manifest_path {
            Some(path) => ProjectManifest::load(path)?,
            None => ProjectManifest::default(),
        };

        let registry = FieldRegistry::with_extra_fields(manifest.fields.iter().cloned())?;
        let mut layers = Vec::new();

        if let Some(global_dir) = self.global_config_dir() {
            let global_path = global_dir.join(GLOBAL_DEFAULTS_FILE);
            if global_path.is_file() {
                tracing::debug!(?global_path, "Loading global defaults");
                layers.push(ConfigLayer::load(
                    GLOBAL_LAYER,
                    LayerOrigin::Global,
                    &global_path,
                )?);
            } else {
                tracing::debug!(?global_path, "No global defaults found, skipping");
            }
        }

        let base_dir = self
            .manifest_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default();
        for entry in &manifest.layers {
            let path = base_dir.join(&entry.path);
            layers.push(ConfigLayer::load(entry.name.clone(), entry.origin, &path)?);
        }

        let mut names: HashSet<String> =
            manifest.layers.iter().map(|entry| entry.name.clone()).collect();
        for path in &self.layer_files {
            let name = layer_name(path);
            if RESERVED_LAYER_NAMES.contains(&name.as_str()) {
                return Err(Error::InvalidLayer {
                    message: format!("layer name is reserved ({})", path.display()),
                    layer: name,
                });
            }
            if !names.insert(name.clone()) {
                return Err(Error::InvalidLayer {
                    message: format!("layer name is already in use ({})", path.display()),
                    layer: name,
                });
            }
            layers.push(ConfigLayer::load(name, LayerOrigin::Flavor, path)?);
        }

        if !self.assignments.is_empty() {
            layers.push(ConfigLayer::from_assignments(
                ASSIGNMENTS_LAYER,
                &registry,
                &self.assignments,
            )?);
        }

        let options = ReportOptions {
            warnings_as_errors: manifest.options.warnings_as_errors || self.warnings_as_errors,
        };

        Ok(Project {
            registry,
            layers,
            options,
        })
    }
}

/// Layer name for a file given on the command line: its file stem
fn layer_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
