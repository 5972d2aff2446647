//! Built-in validation checks
//!
//! Each check reads the resolved configuration and appends zero or more
//! diagnostics. Checks skip comparisons whose operands are absent, so they
//! also run against registries that only declare a subset of the fields.

use crate::resolved::ResolvedConfig;
use crate::schema::{BUILD_TYPES, FieldRegistry};

use super::Check;
use super::diagnostic::Diagnostic;

/// Minimum API level with native multidex support
const NATIVE_MULTIDEX_SDK: i64 = 21;

/// Every required field must end up with a value
pub struct RequiredFields;

impl Check for RequiredFields {
    fn name(&self) -> &'static str {
        "required-fields"
    }

    fn run(&self, schema: &FieldRegistry, config: &ResolvedConfig, out: &mut Vec<Diagnostic>) {
        for field in schema.fields().iter().filter(|f| f.required) {
            if !config.contains(&field.name) {
                out.push(Diagnostic::error(
                    self.name(),
                    [field.name.as_str()],
                    "required field is not set",
                ));
            }
        }
    }
}

/// Every present value must satisfy its field predicate
pub struct FieldConstraints;

impl Check for FieldConstraints {
    fn name(&self) -> &'static str {
        "field-constraints"
    }

    fn run(&self, schema: &FieldRegistry, config: &ResolvedConfig, out: &mut Vec<Diagnostic>) {
        for field in schema.fields() {
            let (Some(predicate), Some(value)) = (field.predicate, config.get(&field.name)) else {
                continue;
            };
            if let Err(message) = predicate.check(value) {
                out.push(Diagnostic::error(self.name(), [field.name.as_str()], message));
            }
        }
    }
}

/// `minSdk <= targetSdk <= compileSdk`
pub struct SdkOrdering;

impl Check for SdkOrdering {
    fn name(&self) -> &'static str {
        "sdk-ordering"
    }

    fn run(&self, _schema: &FieldRegistry, config: &ResolvedConfig, out: &mut Vec<Diagnostic>) {
        let min = config.get_i64("minSdk");
        let target = config.get_i64("targetSdk");
        let compile = config.get_i64("compileSdk");

        if let (Some(min), Some(target)) = (min, target) {
            if min > target {
                out.push(Diagnostic::error(
                    self.name(),
                    ["minSdk", "targetSdk"],
                    format!("minSdk > targetSdk ({} > {})", min, target),
                ));
            }
        }
        if let (Some(target), Some(compile)) = (target, compile) {
            if target > compile {
                out.push(Diagnostic::error(
                    self.name(),
                    ["targetSdk", "compileSdk"],
                    format!("targetSdk > compileSdk ({} > {})", target, compile),
                ));
            }
        }
    }
}

/// Minified build types must also shrink resources, unless acknowledged
pub struct MinifyShrink;

impl Check for MinifyShrink {
    fn name(&self) -> &'static str {
        "minify-shrink"
    }

    fn run(&self, _schema: &FieldRegistry, config: &ResolvedConfig, out: &mut Vec<Diagnostic>) {
        for build_type in BUILD_TYPES {
            let minify = format!("{}.minifyEnabled", build_type);
            let shrink = format!("{}.shrinkResources", build_type);
            let acknowledge = format!("{}.acknowledgeUnshrunkResources", build_type);

            let minified = config.get_bool(&minify).unwrap_or(false);
            let shrunk = config.get_bool(&shrink).unwrap_or(false);
            let acknowledged = config.get_bool(&acknowledge).unwrap_or(false);

            if minified && !shrunk && !acknowledged {
                out.push(Diagnostic::error(
                    self.name(),
                    [minify.as_str(), shrink.as_str()],
                    format!(
                        "{} build enables minifyEnabled without shrinkResources (set {} to accept)",
                        build_type, acknowledge
                    ),
                ));
            }
        }
    }
}

/// Resource shrinking only works on minified builds
pub struct ShrinkRequiresMinify;

impl Check for ShrinkRequiresMinify {
    fn name(&self) -> &'static str {
        "shrink-requires-minify"
    }

    fn run(&self, _schema: &FieldRegistry, config: &ResolvedConfig, out: &mut Vec<Diagnostic>) {
        for build_type in BUILD_TYPES {
            let minify = format!("{}.minifyEnabled", build_type);
            let shrink = format!("{}.shrinkResources", build_type);

            if config.get_bool(&shrink) == Some(true) && config.get_bool(&minify) != Some(true) {
                out.push(Diagnostic::error(
                    self.name(),
                    [shrink.as_str(), minify.as_str()],
                    format!(
                        "{} build enables shrinkResources without minifyEnabled",
                        build_type
                    ),
                ));
            }
        }
    }
}

/// Java source/target levels and the Kotlin JVM target must agree
pub struct JavaCompatibility;

impl Check for JavaCompatibility {
    fn name(&self) -> &'static str {
        "java-compatibility"
    }

    fn run(&self, _schema: &FieldRegistry, config: &ResolvedConfig, out: &mut Vec<Diagnostic>) {
        let source = config.get_i64("sourceCompatibility");
        let target = config.get_i64("targetCompatibility");
        let jvm = config.get_i64("jvmTarget");

        if let (Some(source), Some(target)) = (source, target) {
            if source > target {
                out.push(Diagnostic::error(
                    self.name(),
                    ["sourceCompatibility", "targetCompatibility"],
                    format!(
                        "sourceCompatibility > targetCompatibility ({} > {})",
                        source, target
                    ),
                ));
            }
        }
        if let (Some(jvm), Some(target)) = (jvm, target) {
            if jvm != target {
                out.push(Diagnostic::error(
                    self.name(),
                    ["jvmTarget", "targetCompatibility"],
                    format!(
                        "jvmTarget ({}) does not match targetCompatibility ({})",
                        jvm, target
                    ),
                ));
            }
        }
    }
}

/// Core library desugaring needs the desugar_jdk_libs dependency
pub struct Desugaring;

impl Check for Desugaring {
    fn name(&self) -> &'static str {
        "desugaring"
    }

    fn run(&self, _schema: &FieldRegistry, config: &ResolvedConfig, out: &mut Vec<Diagnostic>) {
        let enabled = config.get_bool("coreLibraryDesugaringEnabled");
        let version = config.get_str("desugarJdkLibsVersion");

        match (enabled, version) {
            (Some(true), None) => out.push(Diagnostic::error(
                self.name(),
                ["coreLibraryDesugaringEnabled", "desugarJdkLibsVersion"],
                "core library desugaring is enabled but desugarJdkLibsVersion is not set",
            )),
            (Some(false), Some(version)) => out.push(Diagnostic::warning(
                self.name(),
                ["desugarJdkLibsVersion", "coreLibraryDesugaringEnabled"],
                format!(
                    "desugar_jdk_libs {} is declared but core library desugaring is disabled",
                    version
                ),
            )),
            _ => {}
        }
    }
}

/// Release builds should not ship with the debug signing key
pub struct ReleaseSigning;

impl Check for ReleaseSigning {
    fn name(&self) -> &'static str {
        "release-signing"
    }

    fn run(&self, _schema: &FieldRegistry, config: &ResolvedConfig, out: &mut Vec<Diagnostic>) {
        if config.get_str("release.signingConfig") == Some("debug") {
            out.push(Diagnostic::warning(
                self.name(),
                ["release.signingConfig"],
                "release build is signed with the debug key",
            ));
        }
    }
}

/// Below API 21 multidex must be enabled explicitly
pub struct LegacyMultidex;

impl Check for LegacyMultidex {
    fn name(&self) -> &'static str {
        "legacy-multidex"
    }

    fn run(&self, _schema: &FieldRegistry, config: &ResolvedConfig, out: &mut Vec<Diagnostic>) {
        let (Some(min), Some(multidex)) =
            (config.get_i64("minSdk"), config.get_bool("multiDexEnabled"))
        else {
            return;
        };
        if min < NATIVE_MULTIDEX_SDK && !multidex {
            out.push(Diagnostic::warning(
                self.name(),
                ["multiDexEnabled", "minSdk"],
                format!(
                    "minSdk {} has no native multidex support; enable multiDexEnabled",
                    min
                ),
            ));
        }
    }
}
