//! Field schema registry
//!
//! The registry is the closed set of keys a layer may set. Fields are
//! write-once: registering a name twice is an error, never an overwrite.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::value::ConfigValue;

use super::field::ConfigField;

/// Registry of known configuration fields
///
/// Fields keep their registration order for listing; lookups go through a
/// name index.
///
/// # Example
///
/// ```
/// use buildconf_core::{ConfigField, FieldRegistry, FieldType};
///
/// let mut registry = FieldRegistry::new();
/// registry
///     .register(ConfigField::new("minSdk", FieldType::Integer).with_default(21))
///     .unwrap();
/// assert!(registry.contains("minSdk"));
/// assert!(!registry.contains("minsdk"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    /// Fields in registration order
    fields: Vec<ConfigField>,
    /// Maps field name to its index in `fields`
    index: HashMap<String, usize>,
}

impl FieldRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateField`] if the name is already registered
    /// - [`Error::InvalidDefault`] if the default does not match the declared type
    pub fn register(&mut self, field: ConfigField) -> Result<()> {
        if self.index.contains_key(&field.name) {
            return Err(Error::DuplicateField { name: field.name });
        }
        if let Some(default) = field.default.as_ref().filter(|_| !field.default_matches_type()) {
            return Err(Error::InvalidDefault {
                name: field.name.clone(),
                expected: field.field_type,
                found: default.field_type(),
            });
        }

        tracing::debug!(field = %field.name, kind = %field.field_type, "Registered field");
        self.index.insert(field.name.clone(), self.fields.len());
        self.fields.push(field);
        Ok(())
    }

    /// Register several fields, stopping at the first failure
    pub fn register_all(&mut self, fields: impl IntoIterator<Item = ConfigField>) -> Result<()> {
        for field in fields {
            self.register(field)?;
        }
        Ok(())
    }

    /// Look up a field by exact name
    pub fn get(&self, name: &str) -> Option<&ConfigField> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Check if a field is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All fields in registration order
    pub fn fields(&self) -> &[ConfigField] {
        &self.fields
    }

    /// Fields that carry a default value, with that value
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.fields
            .iter()
            .filter_map(|f| f.default.as_ref().map(|d| (f.name.as_str(), d)))
    }

    /// Number of registered fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
