//! Built-in Android application fields
//!
//! Mirrors the settings an Android app module declares in its Gradle build:
//! SDK levels, application identity, Java/Kotlin compatibility, core library
//! desugaring and per-build-type shrinking and signing.

use crate::error::Result;
use crate::value::FieldType;

use super::field::{ConfigField, Predicate};
use super::registry::FieldRegistry;

/// Build types whose fields are namespaced as `<build type>.<field>`
pub const BUILD_TYPES: &[&str] = &["debug", "release"];

/// Default compile and target SDK level
pub const DEFAULT_SDK: i64 = 35;

/// Default minimum SDK level
pub const DEFAULT_MIN_SDK: i64 = 21;

/// Default Java language level for source, target and JVM target
pub const DEFAULT_JAVA_VERSION: i64 = 17;

/// Default NDK version
pub const DEFAULT_NDK_VERSION: &str = "27.0.12077973";

fn android_fields() -> Vec<ConfigField> {
    let mut fields = vec![
        ConfigField::new("namespace", FieldType::String)
            .required()
            .with_predicate(Predicate::PackageName)
            .with_description("Package used for the generated R and BuildConfig classes"),
        ConfigField::new("applicationId", FieldType::String)
            .required()
            .with_predicate(Predicate::PackageName)
            .with_description("Unique application identifier"),
        ConfigField::new("compileSdk", FieldType::Integer)
            .with_default(DEFAULT_SDK)
            .required()
            .with_predicate(Predicate::SdkLevel)
            .with_description("API level the app is compiled against"),
        ConfigField::new("minSdk", FieldType::Integer)
            .with_default(DEFAULT_MIN_SDK)
            .required()
            .with_predicate(Predicate::SdkLevel)
            .with_description("Lowest API level the app runs on"),
        ConfigField::new("targetSdk", FieldType::Integer)
            .with_default(DEFAULT_SDK)
            .required()
            .with_predicate(Predicate::SdkLevel)
            .with_description("API level the app is tested against"),
        ConfigField::new("ndkVersion", FieldType::String)
            .with_default(DEFAULT_NDK_VERSION)
            .with_predicate(Predicate::DottedVersion)
            .with_description("Android NDK version"),
        ConfigField::new("versionCode", FieldType::Integer)
            .with_default(1)
            .required()
            .with_predicate(Predicate::Positive)
            .with_description("Internal version number"),
        ConfigField::new("versionName", FieldType::String)
            .with_default("1.0.0")
            .required()
            .with_predicate(Predicate::NonEmpty)
            .with_description("Version string shown to users"),
        ConfigField::new("multiDexEnabled", FieldType::Boolean)
            .with_default(false)
            .with_description("Allow more than 64K methods"),
        ConfigField::new("sourceCompatibility", FieldType::Integer)
            .with_default(DEFAULT_JAVA_VERSION)
            .required()
            .with_predicate(Predicate::JavaVersion)
            .with_description("Java language level of the sources"),
        ConfigField::new("targetCompatibility", FieldType::Integer)
            .with_default(DEFAULT_JAVA_VERSION)
            .required()
            .with_predicate(Predicate::JavaVersion)
            .with_description("Java bytecode level"),
        ConfigField::new("jvmTarget", FieldType::Integer)
            .with_default(DEFAULT_JAVA_VERSION)
            .required()
            .with_predicate(Predicate::JavaVersion)
            .with_description("Kotlin JVM target"),
        ConfigField::new("coreLibraryDesugaringEnabled", FieldType::Boolean)
            .with_default(false)
            .with_description("Desugar Java 8+ library APIs for older devices"),
        ConfigField::new("desugarJdkLibsVersion", FieldType::String)
            .with_predicate(Predicate::DottedVersion)
            .with_description("Version of com.android.tools:desugar_jdk_libs"),
    ];

    for build_type in BUILD_TYPES {
        fields.push(
            ConfigField::new(format!("{}.minifyEnabled", build_type), FieldType::Boolean)
                .with_default(false)
                .with_description("Shrink and obfuscate code"),
        );
        fields.push(
            ConfigField::new(format!("{}.shrinkResources", build_type), FieldType::Boolean)
                .with_default(false)
                .with_description("Remove unused resources"),
        );
        fields.push(
            ConfigField::new(
                format!("{}.acknowledgeUnshrunkResources", build_type),
                FieldType::Boolean,
            )
            .with_default(false)
            .with_description("Accept minified code without resource shrinking"),
        );
    }

    fields.push(
        ConfigField::new("release.signingConfig", FieldType::String)
            .with_default("debug")
            .with_predicate(Predicate::NonEmpty)
            .with_description("Signing config used for release builds"),
    );

    fields
}

impl FieldRegistry {
    /// Create a registry with the built-in Android application fields
    ///
    /// # Example
    ///
    /// ```
    /// use buildconf_core::FieldRegistry;
    ///
    /// let registry = FieldRegistry::with_android_defaults();
    /// assert!(registry.contains("minSdk"));
    /// assert!(registry.contains("release.minifyEnabled"));
    /// ```
    pub fn with_android_defaults() -> Self {
        let mut registry = Self::new();
        for field in android_fields() {
            // Names above are unique and defaults match their declared types.
            if let Err(e) = registry.register(field) {
                tracing::error!("Built-in field rejected: {}", e);
            }
        }
        registry
    }

    /// Create the built-in registry and add project-specific fields
    ///
    /// # Errors
    ///
    /// Fails with [`crate::Error::DuplicateField`] if an extra field reuses a
    /// built-in name.
    pub fn with_extra_fields(extra: impl IntoIterator<Item = ConfigField>) -> Result<Self> {
        let mut registry = Self::with_android_defaults();
        registry.register_all(extra)?;
        Ok(registry)
    }
}
