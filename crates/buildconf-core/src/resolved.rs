//! The merged configuration produced by one resolution run

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::ConfigValue;

/// A resolved field value and the layer that supplied it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedValue {
    pub value: ConfigValue,
    /// Name of the winning layer, or `"defaults"` for registry defaults
    pub layer: String,
}

/// Final field-to-value mapping after applying all layers
///
/// Keys are kept sorted so iteration and serialization are deterministic.
/// Fields without a default that no layer set are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedConfig {
    values: BTreeMap<String, ResolvedValue>,
}

impl ResolvedConfig {
    pub(crate) fn set(&mut self, field: &str, value: ConfigValue, layer: &str) {
        self.values.insert(
            field.to_string(),
            ResolvedValue {
                value,
                layer: layer.to_string(),
            },
        );
    }

    /// Get a value by field name
    pub fn get(&self, field: &str) -> Option<&ConfigValue> {
        self.values.get(field).map(|r| &r.value)
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(ConfigValue::as_i64)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(ConfigValue::as_str)
    }

    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(ConfigValue::as_bool)
    }

    /// Name of the layer that supplied a field
    pub fn source_of(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(|r| r.layer.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Iterate fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Plain `field -> value` map without provenance
    pub fn values(&self) -> BTreeMap<&str, &ConfigValue> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), &v.value))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
