//! Validation findings

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Potential problem; never blocks a resolution
    Warning,
    /// Constraint violation; resolution fails
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A validation finding about the resolved configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Fields involved, most relevant first
    pub fields: Vec<String>,
    /// Name of the check that produced this diagnostic
    pub check: String,
    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    pub fn error<I, S>(check: &str, fields: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_severity(Severity::Error, check, fields, message)
    }

    pub fn warning<I, S>(check: &str, fields: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_severity(Severity::Warning, check, fields, message)
    }

    fn with_severity<I, S>(
        severity: Severity,
        check: &str,
        fields: I,
        message: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            severity,
            fields: fields.into_iter().map(Into::into).collect(),
            check: check.to_string(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// The text after the severity: `<field>[, <field>]: <message>`
    ///
    /// Front ends that style the severity themselves print this after it.
    pub fn detail(&self) -> String {
        format!("{}: {}", self.fields.join(", "), self.message)
    }
}

/// Renders as `<severity>: <field>[, <field>]: <message>`
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.detail())
    }
}
