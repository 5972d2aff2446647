//! End-to-end integration test for a Flutter Android app
//!
//! This test exercises the complete flow: manifest loading -> layer files ->
//! merge -> validation -> report.

use buildconf_core::{LayerOrigin, ProjectLoader, Severity};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Set up a project mirroring a Flutter app's android/app module
fn setup_app_project() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("layers")).unwrap();

    fs::write(
        root.join("layers/flutter.toml"),
        r#"
versionCode = 7
versionName = "1.3.0"

[flutter]
source = "../.."
"#,
    )
    .unwrap();

    fs::write(
        root.join("layers/app.toml"),
        r#"
namespace = "com.example.rss_feed_example"
applicationId = "com.example.rss_feed_example"
compileSdk = 35
ndkVersion = "27.0.12077973"
minSdk = 23
targetSdk = 35
multiDexEnabled = true
sourceCompatibility = 17
targetCompatibility = 17
jvmTarget = 17
coreLibraryDesugaringEnabled = true
desugarJdkLibsVersion = "2.0.4"

[debug]
minifyEnabled = false
shrinkResources = false

[release]
signingConfig = "debug"
minifyEnabled = false
shrinkResources = false
"#,
    )
    .unwrap();

    let manifest = root.join("buildconf.toml");
    fs::write(
        &manifest,
        r#"
[[fields]]
name = "flutter.source"
type = "string"
required = true
predicate = "non-empty"
description = "Path to the Flutter module"

[[layers]]
name = "flutter"
path = "layers/flutter.toml"

[[layers]]
name = "app"
path = "layers/app.toml"
"#,
    )
    .unwrap();

    (temp, manifest)
}

fn loader(manifest: &Path) -> ProjectLoader {
    ProjectLoader::new().with_manifest(manifest).without_global()
}

#[test]
fn test_app_project_resolves_with_signing_warning() {
    let (_temp, manifest) = setup_app_project();

    let report = loader(&manifest).load().unwrap().resolve().unwrap();

    assert!(report.is_success());
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.error_count(), 0);

    let warnings: Vec<&str> = report.warnings().map(|d| d.check.as_str()).collect();
    assert_eq!(warnings, vec!["release-signing"]);

    let config = &report.config;
    assert_eq!(config.get_i64("compileSdk"), Some(35));
    assert_eq!(config.get_i64("minSdk"), Some(23));
    assert_eq!(config.get_i64("versionCode"), Some(7));
    assert_eq!(config.get_str("versionName"), Some("1.3.0"));
    assert_eq!(config.get_str("flutter.source"), Some("../.."));
    assert_eq!(config.get_bool("coreLibraryDesugaringEnabled"), Some(true));
    assert_eq!(config.get_str("release.signingConfig"), Some("debug"));
}

#[test]
fn test_provenance_tracks_each_layer() {
    let (_temp, manifest) = setup_app_project();

    let report = loader(&manifest).load().unwrap().resolve().unwrap();

    assert_eq!(report.config.source_of("versionCode"), Some("flutter"));
    assert_eq!(report.config.source_of("namespace"), Some("app"));
    // Not set by any layer
    assert_eq!(report.config.source_of("release.acknowledgeUnshrunkResources"), Some("defaults"));

    let sources: Vec<(&str, LayerOrigin)> = report
        .sources
        .iter()
        .map(|s| (s.name.as_str(), s.origin))
        .collect();
    assert_eq!(
        sources,
        vec![
            ("defaults", LayerOrigin::Defaults),
            ("flutter", LayerOrigin::Flavor),
            ("app", LayerOrigin::Flavor),
        ]
    );
    assert!(report.sources[1].path.as_ref().unwrap().ends_with("layers/flutter.toml"));
}

#[test]
fn test_release_signing_override_clears_warning() {
    let (_temp, manifest) = setup_app_project();

    let report = loader(&manifest)
        .with_assignments(["release.signingConfig=release".to_string()])
        .load()
        .unwrap()
        .resolve()
        .unwrap();

    assert!(report.diagnostics.is_empty(), "unexpected: {:?}", report.diagnostics);
    assert_eq!(report.config.source_of("release.signingConfig"), Some("cli"));
}

#[test]
fn test_java_11_options_conflict_with_kotlin_jvm_target() {
    let (temp, manifest) = setup_app_project();
    let java11 = temp.path().join("java11.toml");
    fs::write(&java11, "sourceCompatibility = 11\ntargetCompatibility = 11\n").unwrap();

    let report = loader(&manifest)
        .with_layer_files([java11])
        .load()
        .unwrap()
        .resolve()
        .unwrap();

    assert!(!report.is_success());
    let errors: Vec<String> = report.errors().map(|d| d.to_string()).collect();
    assert_eq!(
        errors,
        vec!["error: jvmTarget, targetCompatibility: jvmTarget (17) does not match targetCompatibility (11)"]
    );
}

#[test]
fn test_warnings_as_errors_in_manifest_blocks() {
    let (_temp, manifest) = setup_app_project();
    let content = fs::read_to_string(&manifest).unwrap();
    fs::write(&manifest, format!("[options]\nwarnings_as_errors = true\n{}", content)).unwrap();

    let report = loader(&manifest).load().unwrap().resolve().unwrap();

    assert_eq!(report.error_count(), 0);
    assert_eq!(report.warnings().next().map(|d| d.severity), Some(Severity::Warning));
    assert!(!report.is_success());
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn test_report_json_round_trips_through_serde() {
    let (_temp, manifest) = setup_app_project();

    let report = loader(&manifest).load().unwrap().resolve().unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["config"]["flutter.source"]["value"], "../..");
    assert_eq!(json["diagnostics"][0]["check"], "release-signing");
    assert_eq!(json["diagnostics"][0]["severity"], "warning");
}
