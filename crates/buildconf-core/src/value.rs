//! Typed scalar values carried by configuration fields

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a configuration field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Integer,
    String,
    Boolean,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::String => write!(f, "string"),
            Self::Boolean => write!(f, "boolean"),
        }
    }
}

/// A single configuration value
///
/// Serializes as the bare scalar, so a resolved configuration renders as a
/// plain `{ "minSdk": 21, ... }` object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Integer(i64),
    String(String),
    Boolean(bool),
}

impl ConfigValue {
    /// The type of this value
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Integer(_) => FieldType::Integer,
            Self::String(_) => FieldType::String,
            Self::Boolean(_) => FieldType::Boolean,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Parse a textual value according to the expected field type
    ///
    /// Used for values given on the command line, where everything arrives
    /// as a string. Strings may optionally be wrapped in double quotes.
    pub fn parse_as(input: &str, field_type: FieldType) -> Option<Self> {
        let input = input.trim();
        match field_type {
            FieldType::Integer => input.parse().ok().map(Self::Integer),
            FieldType::Boolean => match input {
                "true" => Some(Self::Boolean(true)),
                "false" => Some(Self::Boolean(false)),
                _ => None,
            },
            FieldType::String => {
                let unquoted = input
                    .strip_prefix('"')
                    .and_then(|s| s.strip_suffix('"'))
                    .unwrap_or(input);
                Some(Self::String(unquoted.to_string()))
            }
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{}", i),
            Self::String(s) => write!(f, "\"{}\"", s),
            Self::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl TryFrom<toml::Value> for ConfigValue {
    /// Name of the unsupported TOML type
    type Error = &'static str;

    fn try_from(value: toml::Value) -> std::result::Result<Self, Self::Error> {
        match value {
            toml::Value::Integer(i) => Ok(Self::Integer(i)),
            toml::Value::String(s) => Ok(Self::String(s)),
            toml::Value::Boolean(b) => Ok(Self::Boolean(b)),
            toml::Value::Float(_) => Err("float"),
            toml::Value::Datetime(_) => Err("datetime"),
            toml::Value::Array(_) => Err("array"),
            toml::Value::Table(_) => Err("table"),
        }
    }
}
