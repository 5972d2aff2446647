//! Error types for buildconf-core

use std::path::PathBuf;

use crate::value::FieldType;

/// Result type for buildconf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a schema or merging layers
///
/// Relational problems in an otherwise well-formed configuration are not
/// errors; they are reported as [`crate::Diagnostic`]s by the validator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field was registered twice under the same name
    #[error("Field '{name}' is already registered")]
    DuplicateField { name: String },

    /// A field's default value does not match its declared type
    #[error("Field '{name}' is declared {expected} but its default is {found}")]
    InvalidDefault {
        name: String,
        expected: FieldType,
        found: FieldType,
    },

    /// A layer references a field that is not in the registry
    #[error("Unknown field '{field}' in layer '{layer}'")]
    UnknownField { field: String, layer: String },

    /// A layer sets a field to a value of the wrong type
    #[error("Field '{field}' in layer '{layer}' expects {expected}, found {found}")]
    TypeMismatch {
        field: String,
        layer: String,
        expected: FieldType,
        found: FieldType,
    },

    /// A layer document contains a value that cannot be a field value
    #[error("Invalid layer '{layer}': {message}")]
    InvalidLayer { layer: String, message: String },

    /// A `KEY=VALUE` assignment could not be parsed
    #[error("Invalid assignment '{input}': {message}")]
    InvalidAssignment { input: String, message: String },

    /// The project manifest is malformed
    #[error("Invalid manifest at {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    // Transparent wrappers for underlying crate errors
    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
