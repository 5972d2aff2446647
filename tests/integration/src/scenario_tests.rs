//! Scenario tests for layered resolution
//!
//! Each test builds layers in memory and checks the resolved values and
//! diagnostics the way a build would see them.

use buildconf_core::{
    ConfigField, ConfigLayer, ConfigValue, Error, FieldRegistry, FieldType, LayerOrigin,
    ReportOptions, Resolver, Severity, resolve,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Registry with only the three SDK levels
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

/// Layer that satisfies every required built-in field and signs releases properly
fn identity() -> ConfigLayer {
    ConfigLayer::new(
        "identity",
        LayerOrigin::Flavor,
        [
            ("namespace", "com.example.rss_feed_example"),
            ("applicationId", "com.example.rss_feed_example"),
            ("release.signingConfig", "release"),
        ],
    )
}

fn explicit(entries: &[(&str, ConfigValue)]) -> ConfigLayer {
    ConfigLayer::new("explicit", LayerOrigin::Explicit, entries.to_vec())
}

fn android_checks(layers: &[ConfigLayer]) -> Vec<(Severity, String)> {
    let mut all = vec![identity()];
    all.extend_from_slice(layers);
    let report = resolve(&FieldRegistry::with_android_defaults(), &all).unwrap();
    report
        .diagnostics
        .iter()
        .map(|d| (d.severity, d.check.clone()))
        .collect()
}

// =============================================================================
// SDK levels
// =============================================================================

#[test]
fn test_sdk_override_is_clean() {
    let layer = ConfigLayer::new(
        "override",
        LayerOrigin::Flavor,
        [("targetSdk", 35), ("compileSdk", 35)],
    );

    let report = resolve(&sdk_registry(), &[layer]).unwrap();

    let values: Vec<(&str, i64)> = report
        .config
        .iter()
        .map(|(name, resolved)| (name, resolved.value.as_i64().unwrap()))
        .collect();
    assert_eq!(
        values,
        vec![("compileSdk", 35), ("minSdk", 21), ("targetSdk", 35)]
    );
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_min_above_target_reports_one_error() {
    let layer = ConfigLayer::new(
        "bad",
        LayerOrigin::Explicit,
        [("minSdk", 30), ("targetSdk", 23), ("compileSdk", 33)],
    );

    let report = resolve(&sdk_registry(), &[layer]).unwrap();

    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].severity, Severity::Error);
    assert_eq!(report.diagnostics[0].fields, vec!["minSdk", "targetSdk"]);
    assert!(report.diagnostics[0].message.contains("minSdk > targetSdk"));
}

#[test]
fn test_misspelled_field_aborts_whole_resolution() {
    let good = ConfigLayer::new("good", LayerOrigin::Flavor, [("minSdk", 24)]);
    let typo = ConfigLayer::new("typo", LayerOrigin::Explicit, [("minsdk", 23)]);

    let err = resolve(&sdk_registry(), &[good, typo]).unwrap_err();

    match err {
        Error::UnknownField { field, layer } => {
            assert_eq!(field, "minsdk");
            assert_eq!(layer, "typo");
        }
        other => panic!("expected UnknownField, got {:?}", other),
    }
}

#[test]
fn test_wrong_type_aborts_resolution() {
    let layer = ConfigLayer::new("flavor", LayerOrigin::Flavor, [("minSdk", "21")]);

    let err = resolve(&sdk_registry(), &[layer]).unwrap_err();

    assert!(matches!(
        err,
        Error::TypeMismatch {
            expected: FieldType::Integer,
            found: FieldType::String,
            ..
        }
    ));
}

#[rstest]
#[case(21, 35, 35, true)]
#[case(35, 35, 35, true)]
#[case(23, 35, 34, false)]
#[case(36, 35, 35, false)]
fn test_sdk_ordering_cases(
    #[case] min: i64,
    #[case] target: i64,
    #[case] compile: i64,
    #[case] ok: bool,
) {
    let layer = ConfigLayer::new(
        "sdk",
        LayerOrigin::Flavor,
        [("minSdk", min), ("targetSdk", target), ("compileSdk", compile)],
    );
    let report = resolve(&sdk_registry(), &[layer]).unwrap();
    assert_eq!(report.is_success(), ok);
}

// =============================================================================
// Build types
// =============================================================================

#[rstest]
#[case::both_off(false, false, false, vec![])]
#[case::both_on(true, true, false, vec![])]
#[case::minify_only(true, false, false, vec![(Severity::Error, "minify-shrink")])]
#[case::minify_only_acknowledged(true, false, true, vec![])]
#[case::shrink_only(false, true, false, vec![(Severity::Error, "shrink-requires-minify")])]
fn test_release_minify_and_shrink(
    #[case] minify: bool,
    #[case] shrink: bool,
    #[case] acknowledged: bool,
    #[case] expected: Vec<(Severity, &str)>,
) {
    let layer = explicit(&[
        ("release.minifyEnabled", minify.into()),
        ("release.shrinkResources", shrink.into()),
        ("release.acknowledgeUnshrunkResources", acknowledged.into()),
    ]);

    let found = android_checks(&[layer]);
    let expected: Vec<(Severity, String)> = expected
        .into_iter()
        .map(|(s, c)| (s, c.to_string()))
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_debug_and_release_checked_independently() {
    let layer = explicit(&[
        ("debug.shrinkResources", true.into()),
        ("release.minifyEnabled", true.into()),
        ("release.shrinkResources", true.into()),
    ]);

    let report = resolve(
        &FieldRegistry::with_android_defaults(),
        &[identity(), layer],
    )
    .unwrap();

    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(
        report.diagnostics[0].fields,
        vec!["debug.shrinkResources", "debug.minifyEnabled"]
    );
}

// =============================================================================
// Java, desugaring, multidex
// =============================================================================

#[rstest]
#[case::matching(17, 17, 17, vec![])]
#[case::jvm_mismatch(11, 11, 17, vec![(Severity::Error, "java-compatibility")])]
#[case::source_newer(21, 17, 17, vec![(Severity::Error, "java-compatibility")])]
#[case::unsupported(9, 17, 17, vec![(Severity::Error, "field-constraints")])]
fn test_java_levels(
    #[case] source: i64,
    #[case] target: i64,
    #[case] jvm: i64,
    #[case] expected: Vec<(Severity, &str)>,
) {
    let layer = explicit(&[
        ("sourceCompatibility", source.into()),
        ("targetCompatibility", target.into()),
        ("jvmTarget", jvm.into()),
    ]);

    let found = android_checks(&[layer]);
    let expected: Vec<(Severity, String)> = expected
        .into_iter()
        .map(|(s, c)| (s, c.to_string()))
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_desugaring_without_library_is_error() {
    let layer = explicit(&[("coreLibraryDesugaringEnabled", true.into())]);
    assert_eq!(
        android_checks(&[layer]),
        vec![(Severity::Error, "desugaring".to_string())]
    );
}

#[test]
fn test_desugaring_library_without_flag_is_warning() {
    let layer = explicit(&[("desugarJdkLibsVersion", "2.0.4".into())]);
    assert_eq!(
        android_checks(&[layer]),
        vec![(Severity::Warning, "desugaring".to_string())]
    );
}

#[test]
fn test_legacy_min_sdk_needs_multidex() {
    let without = explicit(&[("minSdk", 19.into())]);
    assert_eq!(
        android_checks(&[without]),
        vec![(Severity::Warning, "legacy-multidex".to_string())]
    );

    let with = explicit(&[("minSdk", 19.into()), ("multiDexEnabled", true.into())]);
    assert!(android_checks(&[with]).is_empty());
}

// =============================================================================
// Layer precedence
// =============================================================================

#[test]
fn test_later_layers_override_earlier() {
    let global = ConfigLayer::new("global", LayerOrigin::Global, [("minSdk", 22)]);
    let flavor = ConfigLayer::new("prod", LayerOrigin::Flavor, [("minSdk", 23), ("targetSdk", 34)]);
    let cli = ConfigLayer::new("cli", LayerOrigin::Explicit, [("targetSdk", 33)]);

    let report = resolve(&sdk_registry(), &[global, flavor, cli]).unwrap();

    assert_eq!(report.config.get_i64("minSdk"), Some(23));
    assert_eq!(report.config.source_of("minSdk"), Some("prod"));
    assert_eq!(report.config.get_i64("targetSdk"), Some(33));
    assert_eq!(report.config.source_of("targetSdk"), Some("cli"));
    assert_eq!(report.config.source_of("compileSdk"), Some("defaults"));
}

#[test]
fn test_assignments_layer_is_typed_by_registry() {
    let registry = FieldRegistry::with_android_defaults();
    let cli = ConfigLayer::from_assignments(
        "cli",
        &registry,
        &["minSdk=24", "versionName=2.0.0", "release.minifyEnabled=true"],
    )
    .unwrap();

    assert_eq!(
        cli.entries().to_vec(),
        vec![
            ("minSdk".to_string(), ConfigValue::from(24)),
            ("versionName".to_string(), ConfigValue::from("2.0.0")),
            ("release.minifyEnabled".to_string(), ConfigValue::from(true)),
        ]
    );
}

#[test]
fn test_resolver_reuse_across_runs() {
    let resolver = Resolver::new(FieldRegistry::with_android_defaults())
        .with_options(ReportOptions { warnings_as_errors: true });

    let signed = resolver.resolve(&[identity()]).unwrap();
    assert!(signed.is_success());

    let debug_signed = explicit(&[("release.signingConfig", "debug".into())]);
    let report = resolver.resolve(&[identity(), debug_signed]).unwrap();
    assert!(!report.is_success());
    assert_eq!(report.warning_count(), 1);
}
