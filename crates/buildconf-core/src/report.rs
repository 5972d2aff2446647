//! Resolution: merge, validate, report
//!
//! A [`Resolver`] owns the schema and the validator; each call to
//! [`Resolver::resolve`] is a pure function of the layers passed in.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layer::{ConfigLayer, LayerOrigin, LayerSource, DEFAULTS_LAYER};
use crate::merge::merge;
use crate::resolved::ResolvedConfig;
use crate::schema::FieldRegistry;
use crate::validate::{Diagnostic, Severity, Validator};

/// Options affecting how diagnostics are turned into a result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Treat warnings as blocking
    #[serde(default)]
    pub warnings_as_errors: bool,
}

/// Outcome of one resolution run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionReport {
    /// Whether the configuration may be used
    pub success: bool,
    /// Merged configuration with per-field provenance
    pub config: ResolvedConfig,
    /// Findings in check order
    pub diagnostics: Vec<Diagnostic>,
    /// Contributing layers in precedence order, registry defaults first
    pub sources: Vec<LayerSource>,
}

impl ResolutionReport {
    fn new(
        config: ResolvedConfig,
        diagnostics: Vec<Diagnostic>,
        sources: Vec<LayerSource>,
        options: ReportOptions,
    ) -> Self {
        let success = !diagnostics.iter().any(|d| {
            d.severity == Severity::Error
                || (options.warnings_as_errors && d.severity == Severity::Warning)
        });
        Self {
            success,
            config,
            diagnostics,
            sources,
        }
    }

    /// True iff no diagnostic blocks the configuration
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Process exit code: 0 on success, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.success { 0 } else { 1 }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Diagnostics, one per line, as `<severity>: <fields>: <message>`
    pub fn render(&self) -> String {
        self.diagnostics
            .iter()
            .map(|d| format!("{}\n", d))
            .collect()
    }

    /// Serialize the full report to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Merges layers and validates the result against a fixed schema
pub struct Resolver {
    registry: FieldRegistry,
    validator: Validator,
    options: ReportOptions,
}

impl Resolver {
    /// Create a resolver with the built-in checks and default options
    pub fn new(registry: FieldRegistry) -> Self {
        Self {
            registry,
            validator: Validator::with_builtins(),
            options: ReportOptions::default(),
        }
    }

    /// Replace the validator
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Replace the report options
    pub fn with_options(mut self, options: ReportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn options(&self) -> ReportOptions {
        self.options
    }

    /// Merge the layers, validate the result and build the report
    ///
    /// # Errors
    ///
    /// Merge failures ([`crate::Error::UnknownField`],
    /// [`crate::Error::TypeMismatch`]) abort the run; no report is produced.
    /// Constraint violations never fail here; they are diagnostics.
    ///
    /// # Example
    ///
    /// ```
    /// use buildconf_core::{ConfigLayer, FieldRegistry, LayerOrigin, Resolver};
    ///
    /// let resolver = Resolver::new(FieldRegistry::with_android_defaults());
    /// let layer = ConfigLayer::new(
    ///     "app",
    ///     LayerOrigin::Flavor,
    ///     [
    ///         ("namespace", "com.example.app"),
    ///         ("applicationId", "com.example.app"),
    ///         ("release.signingConfig", "release"),
    ///     ],
    /// );
    ///
    /// let report = resolver.resolve(&[layer]).unwrap();
    /// assert!(report.is_success());
    /// assert_eq!(report.exit_code(), 0);
    /// ```
    pub fn resolve(&self, layers: &[ConfigLayer]) -> Result<ResolutionReport> {
        run(&self.registry, &self.validator, self.options, layers)
    }
}

fn run(
    registry: &FieldRegistry,
    validator: &Validator,
    options: ReportOptions,
    layers: &[ConfigLayer],
) -> Result<ResolutionReport> {
    let config = merge(registry, layers)?;
    let diagnostics = validator.validate(registry, &config);

    let mut sources = vec![LayerSource {
        name: DEFAULTS_LAYER.to_string(),
        origin: LayerOrigin::Defaults,
        path: None,
        digest: None,
    }];
    sources.extend(layers.iter().map(ConfigLayer::source));

    let report = ResolutionReport::new(config, diagnostics, sources, options);
    tracing::debug!(
        fields = report.config.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        success = report.success,
        "Resolution finished"
    );
    Ok(report)
}

/// Resolve layers against a registry using the built-in checks
pub fn resolve(registry: &FieldRegistry, layers: &[ConfigLayer]) -> Result<ResolutionReport> {
    run(
        registry,
        &Validator::with_builtins(),
        ReportOptions::default(),
        layers,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::schema::ConfigField;
    use crate::value::FieldType;
    use pretty_assertions::assert_eq;

    fn sdk_registry() -> FieldRegistry {
        let mut registry = FieldRegistry::new();
        registry
            .register_all([
                ConfigField::new("minSdk", FieldType::Integer).with_default(21),
                ConfigField::new("targetSdk", FieldType::Integer).with_default(33),
                ConfigField::new("compileSdk", FieldType::Integer).with_default(33),
            ])
            .unwrap();
        registry
    }

    fn identity_layer() -> ConfigLayer {
        ConfigLayer::new(
            "identity",
            LayerOrigin::Flavor,
            [
                ("namespace", "com.example.rss_feed_example"),
                ("applicationId", "com.example.rss_feed_example"),
            ],
        )
    }

    #[test]
    fn test_override_resolves_cleanly() {
        let layer = ConfigLayer::new(
            "override",
            LayerOrigin::Flavor,
            [("targetSdk", 35), ("compileSdk", 35)],
        );
        let report = resolve(&sdk_registry(), &[layer]).unwrap();

        assert_eq!(report.config.get_i64("minSdk"), Some(21));
        assert_eq!(report.config.get_i64("targetSdk"), Some(35));
        assert_eq!(report.config.get_i64("compileSdk"), Some(35));
        assert!(report.diagnostics.is_empty());
        assert!(report.is_success());
    }

    #[test]
    fn test_min_above_target_is_one_error() {
        let layer = ConfigLayer::new(
            "bad",
            LayerOrigin::Explicit,
            [("minSdk", 30), ("targetSdk", 23), ("compileSdk", 33)],
        );
        let report = resolve(&sdk_registry(), &[layer]).unwrap();

        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].severity, Severity::Error);
        assert!(report.diagnostics[0].message.starts_with("minSdk > targetSdk"));
        assert!(!report.is_success());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_unknown_field_returns_no_report() {
        let layer = ConfigLayer::new("typo", LayerOrigin::Explicit, [("minsdk", 23)]);
        let err = resolve(&sdk_registry(), &[layer]).unwrap_err();
        assert!(matches!(err, Error::UnknownField { .. }));
    }

    #[test]
    fn test_warnings_do_not_block_success() {
        // release.signingConfig defaults to "debug", which only warns
        let resolver = Resolver::new(FieldRegistry::with_android_defaults());
        let report = resolver.resolve(&[identity_layer()]).unwrap();

        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 1);
        assert!(report.is_success());
    }

    #[test]
    fn test_warnings_as_errors() {
        let resolver = Resolver::new(FieldRegistry::with_android_defaults()).with_options(
            ReportOptions {
                warnings_as_errors: true,
            },
        );
        let report = resolver.resolve(&[identity_layer()]).unwrap();

        assert_eq!(report.error_count(), 0);
        assert!(!report.is_success());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_render_one_line_per_diagnostic() {
        let layer = ConfigLayer::new(
            "bad",
            LayerOrigin::Explicit,
            [("minSdk", 36), ("targetSdk", 35), ("compileSdk", 34)],
        );
        let report = resolve(&sdk_registry(), &[layer]).unwrap();

        assert_eq!(
            report.render(),
            "error: minSdk, targetSdk: minSdk > targetSdk (36 > 35)\n\
             error: targetSdk, compileSdk: targetSdk > compileSdk (35 > 34)\n"
        );
    }

    #[test]
    fn test_sources_start_with_defaults() {
        let flavor = ConfigLayer::new("flavor", LayerOrigin::Flavor, [("minSdk", 23)]);
        let report = resolve(&sdk_registry(), &[flavor]).unwrap();
        let names: Vec<&str> = report.sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["defaults", "flavor"]);
        assert_eq!(report.sources[0].origin, LayerOrigin::Defaults);
    }

    #[test]
    fn test_to_json() {
        let report = resolve(&sdk_registry(), &[]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["config"]["minSdk"]["value"], 21);
        assert_eq!(json["config"]["minSdk"]["layer"], "defaults");
        assert!(json["diagnostics"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_resolver_and_free_function_agree() {
        let layer = ConfigLayer::new("flavor", LayerOrigin::Flavor, [("minSdk", 30)]);
        let resolver = Resolver::new(sdk_registry());

        let a = resolver.resolve(std::slice::from_ref(&layer)).unwrap();
        let b = resolve(&sdk_registry(), &[layer]).unwrap();

        assert_eq!(a, b);
    }
}
