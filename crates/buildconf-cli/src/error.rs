//! Error types for buildconf-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that abort a CLI run
///
/// Any of these ends the process with exit code 2. Validation findings are
/// not errors; they are printed as diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from buildconf-core
    #[error(transparent)]
    Core(#[from] buildconf_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
