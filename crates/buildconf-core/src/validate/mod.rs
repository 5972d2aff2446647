//! Cross-field validation
//!
//! The validator runs a fixed, ordered list of checks over a resolved
//! configuration. Every check runs, even after a failure, so a single pass
//! reports every problem. Validation never modifies the configuration.

mod checks;
mod diagnostic;

pub use checks::{
    Desugaring, FieldConstraints, JavaCompatibility, LegacyMultidex, MinifyShrink,
    ReleaseSigning, RequiredFields, SdkOrdering, ShrinkRequiresMinify,
};
pub use diagnostic::{Diagnostic, Severity};

use crate::resolved::ResolvedConfig;
use crate::schema::FieldRegistry;

/// A single relational or per-field check
pub trait Check: Send + Sync {
    /// Stable identifier, reported in each diagnostic
    fn name(&self) -> &'static str;

    /// Append diagnostics for every violation found
    fn run(&self, schema: &FieldRegistry, config: &ResolvedConfig, out: &mut Vec<Diagnostic>);
}

/// Ordered collection of checks
pub struct Validator {
    checks: Vec<Box<dyn Check>>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl Validator {
    /// Create a validator with no checks
    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    /// Create a validator with the built-in checks, in their fixed order
    pub fn with_builtins() -> Self {
        Self::empty()
            .with_check(RequiredFields)
            .with_check(FieldConstraints)
            .with_check(SdkOrdering)
            .with_check(MinifyShrink)
            .with_check(ShrinkRequiresMinify)
            .with_check(JavaCompatibility)
            .with_check(Desugaring)
            .with_check(ReleaseSigning)
            .with_check(LegacyMultidex)
    }

    /// Append a check; it runs after all existing ones
    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Names of the configured checks in run order
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run all checks and collect their diagnostics
    pub fn validate(&self, schema: &FieldRegistry, config: &ResolvedConfig) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for check in &self.checks {
            let before = diagnostics.len();
            check.run(schema, config, &mut diagnostics);
            tracing::debug!(
                check = check.name(),
                found = diagnostics.len() - before,
                "Ran check"
            );
        }
        diagnostics
    }
}
