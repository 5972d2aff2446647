//! Project manifest parsing for buildconf.toml files
//!
//! The manifest names the layer files applied on top of the built-in
//! defaults, declares project-specific fields, and sets report options.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layer::LayerOrigin;
use crate::report::ReportOptions;
use crate::schema::ConfigField;

use super::resolver::RESERVED_LAYER_NAMES;

/// Default manifest file name
pub const MANIFEST_FILE: &str = "buildconf.toml";

fn default_origin() -> LayerOrigin {
    LayerOrigin::Flavor
}

/// A layer file declared in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerEntry {
    /// Layer name used in provenance and error messages
    pub name: String,
    /// `flavor` or `explicit`
    #[serde(default = "default_origin")]
    pub origin: LayerOrigin,
    /// Path to the layer file, relative to the manifest directory
    pub path: PathBuf,
}

/// Project manifest parsed from buildconf.toml
///
/// Unknown keys are rejected so a misspelled section fails loudly instead of
/// being ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectManifest {
    /// Report options
    #[serde(default)]
    pub options: ReportOptions,

    /// Project-specific fields, registered after the built-ins
    #[serde(default)]
    pub fields: Vec<ConfigField>,

    /// Layer files in precedence order
    #[serde(default)]
    pub layers: Vec<LayerEntry>,
}

impl ProjectManifest {
    /// Parse a manifest from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use buildconf_core::ProjectManifest;
    ///
    /// let manifest = ProjectManifest::parse(r#"
    /// [[layers]]
    /// name = "prod"
    /// path = "flavors/prod.toml"
    /// "#).unwrap();
    ///
    /// assert_eq!(manifest.layers[0].name, "prod");
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: ProjectManifest = toml::from_str(content)?;
        manifest.check_layers()?;
        Ok(manifest)
    }

    /// Read and parse a manifest file
    ///
    /// Parse failures are reported as [`Error::InvalidManifest`] carrying
    /// the file path.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(?path, "Loading project manifest");
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| match e {
            Error::InvalidManifest { message, .. } => Error::InvalidManifest {
                path: path.to_path_buf(),
                message,
            },
            other => Error::InvalidManifest {
                path: path.to_path_buf(),
                message: other.to_string(),
            },
        })
    }

    /// Layer names must be unique and must not shadow the loader's own layers
    fn check_layers(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.layers {
            if matches!(entry.origin, LayerOrigin::Defaults | LayerOrigin::Global) {
                return Err(invalid(format!(
                    "layer '{}' has origin '{}'; only flavor and explicit layers may be declared",
                    entry.name, entry.origin
                )));
            }
            if RESERVED_LAYER_NAMES.contains(&entry.name.as_str()) {
                return Err(invalid(format!("layer name '{}' is reserved", entry.name)));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(invalid(format!("layer name '{}' is declared twice", entry.name)));
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidManifest {
        path: PathBuf::from(MANIFEST_FILE),
        message,
    }
}
