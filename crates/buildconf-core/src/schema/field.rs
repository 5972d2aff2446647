//! Field declarations for the schema registry
//!
//! A `ConfigField` describes one configuration key: its type, its default,
//! whether it must be set, and an optional per-value predicate.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::value::{ConfigValue, FieldType};

/// Android package names: two or more dot-separated segments, each starting
/// with a letter.
static PACKAGE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$").unwrap());

static DOTTED_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)*$").unwrap());

/// Highest SDK level accepted by [`Predicate::SdkLevel`]
pub const MAX_SDK_LEVEL: i64 = 100;

/// Java language levels the build accepts
pub const JAVA_VERSIONS: &[i64] = &[8, 11, 17, 21];

/// Named value constraint attached to a field
///
/// Predicates are a closed set so the schema stays serializable and every
/// check has a stable, user-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Predicate {
    /// Integer greater than zero
    Positive,
    /// Integer API level in `1..=MAX_SDK_LEVEL`
    SdkLevel,
    /// Integer Java language level from [`JAVA_VERSIONS`]
    JavaVersion,
    /// Dotted package name such as `com.example.app`
    PackageName,
    /// Dotted numeric version such as `27.0.12077973`
    DottedVersion,
    /// Non-empty string
    NonEmpty,
}

impl Predicate {
    /// Check a value against this predicate
    ///
    /// Returns a human-readable message on failure. Values of the wrong type
    /// never reach here; the merger rejects them first.
    pub fn check(&self, value: &ConfigValue) -> std::result::Result<(), String> {
        match (self, value) {
            (Self::Positive, ConfigValue::Integer(i)) if *i <= 0 => {
                Err(format!("must be greater than 0, got {}", i))
            }
            (Self::SdkLevel, ConfigValue::Integer(i)) if !(1..=MAX_SDK_LEVEL).contains(i) => Err(
                format!("must be an API level between 1 and {}, got {}", MAX_SDK_LEVEL, i),
            ),
            (Self::JavaVersion, ConfigValue::Integer(i)) if !JAVA_VERSIONS.contains(i) => {
                let allowed: Vec<String> = JAVA_VERSIONS.iter().map(|v| v.to_string()).collect();
                Err(format!(
                    "unsupported Java version {} (expected one of {})",
                    i,
                    allowed.join(", ")
                ))
            }
            (Self::PackageName, ConfigValue::String(s)) if !PACKAGE_NAME_PATTERN.is_match(s) => {
                Err(format!("'{}' is not a valid package name", s))
            }
            (Self::DottedVersion, ConfigValue::String(s)) if !DOTTED_VERSION_PATTERN.is_match(s) => {
                Err(format!("'{}' is not a dotted numeric version", s))
            }
            (Self::NonEmpty, ConfigValue::String(s)) if s.trim().is_empty() => {
                Err("must not be empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// A registered configuration field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigField {
    /// Unique, case-sensitive key (e.g., "minSdk", "release.minifyEnabled")
    pub name: String,
    /// Declared value type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Value used when no layer sets the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ConfigValue>,
    /// Whether resolution reports an error when the field ends up unset
    #[serde(default)]
    pub required: bool,
    /// Optional value constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<Predicate>,
    /// Short description shown by `buildconf fields`
    #[serde(default)]
    pub description: String,
}

impl ConfigField {
    /// Create an optional field with no default
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            default: None,
            required: false,
            predicate: None,
            description: String::new(),
        }
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<ConfigValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach a predicate
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check that a default, if present, matches the declared type
    pub fn default_matches_type(&self) -> bool {
        self.default
            .as_ref()
            .is_none_or(|d| d.field_type() == self.field_type)
    }
}
