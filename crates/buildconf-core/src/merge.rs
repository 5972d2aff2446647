//! Layer merging
//!
//! Merge semantics:
//! - Start from registry defaults
//! - Apply layers in the given order; later layers override earlier ones
//! - Every key must be registered and carry a value of the declared type
//!
//! All layers are checked before any value is applied, so a bad key in the
//! last layer still produces no partial result.

use crate::error::{Error, Result};
use crate::layer::{ConfigLayer, DEFAULTS_LAYER};
use crate::resolved::ResolvedConfig;
use crate::schema::FieldRegistry;

/// Check that every entry of a layer is a registered field of the right type
///
/// The name `"defaults"` is reserved for registry defaults in provenance and
/// is rejected with [`Error::InvalidLayer`].
pub fn check_layer(registry: &FieldRegistry, layer: &ConfigLayer) -> Result<()> {
    if layer.name() == DEFAULTS_LAYER {
        return Err(Error::InvalidLayer {
            layer: layer.name().to_string(),
            message: "layer name is reserved for registry defaults".to_string(),
        });
    }

    for (field, value) in layer.entries() {
        let declared = registry.get(field).ok_or_else(|| Error::UnknownField {
            field: field.clone(),
            layer: layer.name().to_string(),
        })?;

        if declared.field_type != value.field_type() {
            return Err(Error::TypeMismatch {
                field: field.clone(),
                layer: layer.name().to_string(),
                expected: declared.field_type,
                found: value.field_type(),
            });
        }
    }
    Ok(())
}

/// Merge layers over the registry defaults
///
/// # Errors
///
/// - [`Error::UnknownField`] if any layer sets an unregistered field
/// - [`Error::TypeMismatch`] if any layer sets a field to the wrong type
/// - [`Error::InvalidLayer`] if a layer is named `"defaults"`
///
/// # Example
///
/// ```
/// use buildconf_core::{ConfigLayer, FieldRegistry, LayerOrigin, merge};
///
/// let registry = FieldRegistry::with_android_defaults();
/// let flavor = ConfigLayer::new("prod", LayerOrigin::Flavor, [("minSdk", 24)]);
///
/// let config = merge(&registry, &[flavor]).unwrap();
/// assert_eq!(config.get_i64("minSdk"), Some(24));
/// assert_eq!(config.source_of("minSdk"), Some("prod"));
/// ```
pub fn merge(registry: &FieldRegistry, layers: &[ConfigLayer]) -> Result<ResolvedConfig> {
    for layer in layers {
        check_layer(registry, layer)?;
    }

    let mut config = ResolvedConfig::default();
    for (field, value) in registry.defaults() {
        config.set(field, value.clone(), DEFAULTS_LAYER);
    }

    for layer in layers {
        tracing::debug!(
            layer = layer.name(),
            origin = %layer.origin(),
            entries = layer.len(),
            "Merging layer"
        );
        for (field, value) in layer.entries() {
            config.set(field, value.clone(), layer.name());
        }
    }

    Ok(config)
}
