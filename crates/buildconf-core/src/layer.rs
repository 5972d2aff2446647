//! Configuration layers
//!
//! A layer is one named source of field values: a user-global defaults file,
//! a flavor file, or explicit values given on the command line. Layers are
//! immutable once built; the merger combines them, it never edits them.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::schema::FieldRegistry;
use crate::value::ConfigValue;

/// Name under which registry defaults are attributed in provenance
pub const DEFAULTS_LAYER: &str = "defaults";

/// Where a layer comes from
///
/// Only informs provenance; precedence is given by position in the layer
/// list, not by origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerOrigin {
    /// Registry defaults
    Defaults,
    /// User-global defaults file
    Global,
    /// Flavor or environment override file
    Flavor,
    /// Explicit values (command line or caller-supplied)
    Explicit,
}

impl fmt::Display for LayerOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defaults => write!(f, "defaults"),
            Self::Global => write!(f, "global"),
            Self::Flavor => write!(f, "flavor"),
            Self::Explicit => write!(f, "explicit"),
        }
    }
}

/// Provenance record for a layer that contributed to a resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSource {
    pub name: String,
    pub origin: LayerOrigin,
    /// File the layer was read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// SHA-256 digest of the raw file bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// One ordered set of `(field, value)` overrides
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLayer {
    name: String,
    origin: LayerOrigin,
    path: Option<PathBuf>,
    digest: Option<String>,
    entries: Vec<(String, ConfigValue)>,
}

impl ConfigLayer {
    /// Create a layer from in-memory entries
    pub fn new<K, V>(
        name: impl Into<String>,
        origin: LayerOrigin,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<ConfigValue>,
    {
        Self {
            name: name.into(),
            origin,
            path: None,
            digest: None,
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Create a layer with no entries
    pub fn empty(name: impl Into<String>, origin: LayerOrigin) -> Self {
        Self::new(name, origin, Vec::<(String, ConfigValue)>::new())
    }

    /// Parse a layer from a TOML document
    ///
    /// Nested tables are flattened into dotted field names, so
    ///
    /// ```toml
    /// minSdk = 23
    ///
    /// [release]
    /// minifyEnabled = true
    /// ```
    ///
    /// yields `minSdk` and `release.minifyEnabled`. Entries keep document
    /// order; when a quoted dotted key and a table name the same field, the
    /// one written last wins. Floats, datetimes and arrays are rejected with
    /// [`Error::InvalidLayer`].
    pub fn parse(name: impl Into<String>, origin: LayerOrigin, content: &str) -> Result<Self> {
        let name = name.into();
        let table: toml::Table = toml::from_str(content)?;

        let mut entries = Vec::new();
        flatten_table(&name, String::new(), table, &mut entries)?;

        Ok(Self {
            name,
            origin,
            path: None,
            digest: None,
            entries,
        })
    }

    /// Read and parse a layer file, recording its path and digest
    pub fn load(name: impl Into<String>, origin: LayerOrigin, path: &Path) -> Result<Self> {
        let name = name.into();
        tracing::debug!(layer = %name, ?path, "Loading layer file");

        let bytes = fs::read(path)?;
        let digest = compute_digest(&bytes);
        let content = String::from_utf8(bytes).map_err(|e| Error::InvalidLayer {
            layer: name.clone(),
            message: format!("invalid UTF-8: {}", e),
        })?;

        let mut layer = Self::parse(name, origin, &content)?;
        layer.path = Some(path.to_path_buf());
        layer.digest = Some(digest);
        Ok(layer)
    }

    /// Build a layer from `KEY=VALUE` assignments
    ///
    /// Values are parsed according to the registered type of `KEY`, which is
    /// why the registry is needed here. A key given twice keeps its last value.
    pub fn from_assignments<S: AsRef<str>>(
        name: impl Into<String>,
        registry: &FieldRegistry,
        assignments: &[S],
    ) -> Result<Self> {
        let name = name.into();
        let mut entries: Vec<(String, ConfigValue)> = Vec::new();

        for assignment in assignments {
            let input = assignment.as_ref();
            let (key, raw) = input.split_once('=').ok_or_else(|| Error::InvalidAssignment {
                input: input.to_string(),
                message: "expected KEY=VALUE".to_string(),
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(Error::InvalidAssignment {
                    input: input.to_string(),
                    message: "missing field name".to_string(),
                });
            }

            let field = registry.get(key).ok_or_else(|| Error::UnknownField {
                field: key.to_string(),
                layer: name.clone(),
            })?;
            let value = ConfigValue::parse_as(raw, field.field_type).ok_or_else(|| {
                Error::InvalidAssignment {
                    input: input.to_string(),
                    message: format!("'{}' is not a valid {}", raw.trim(), field.field_type),
                }
            })?;

            entries.retain(|(k, _)| k != key);
            entries.push((key.to_string(), value));
        }

        Ok(Self {
            name,
            origin: LayerOrigin::Explicit,
            path: None,
            digest: None,
            entries,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> LayerOrigin {
        self.origin
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// Entries in declaration order
    pub fn entries(&self) -> &[(String, ConfigValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Provenance record for reports
    pub fn source(&self) -> LayerSource {
        LayerSource {
            name: self.name.clone(),
            origin: self.origin,
            path: self.path.clone(),
            digest: self.digest.clone(),
        }
    }
}

/// SHA-256 of raw layer bytes, formatted as `sha256:<hex>`
fn compute_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{:x}", hasher.finalize())
}

fn flatten_table(
    layer: &str,
    prefix: String,
    table: toml::Table,
    entries: &mut Vec<(String, ConfigValue)>,
) -> Result<()> {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            toml::Value::Table(nested) => flatten_table(layer, path, nested, entries)?,
            other => {
                let value = ConfigValue::try_from(other).map_err(|kind| Error::InvalidLayer {
                    layer: layer.to_string(),
                    message: format!("field '{}' has unsupported {} value", path, kind),
                })?;
                entries.retain(|(k, _)| k != &path);
                entries.push((path, value));
            }
        }
    }
    Ok(())
}
