//! Layered build configuration resolution
//!
//! This crate merges an ordered stack of configuration layers over a typed
//! field schema, then validates the merged result:
//!
//! - **Schema**: typed fields with defaults, required flags and predicates
//! - **Layers**: defaults, global, flavor and explicit key/value sources
//! - **Merge**: last writer wins, with per-field provenance
//! - **Validation**: ordered cross-field checks producing diagnostics
//! - **Reports**: success flag, exit code, text and JSON rendering
//!
//! # Architecture
//!
//! ```text
//!               buildconf (CLI)
//!                     |
//!               config (ProjectLoader)
//!                     |
//!     schema --> layer --> merge --> validate --> report
//! ```
//!
//! # Example
//!
//! ```
//! use buildconf_core::{ConfigLayer, FieldRegistry, LayerOrigin, resolve};
//!
//! let registry = FieldRegistry::with_android_defaults();
//! let layer = ConfigLayer::new(
//!     "app",
//!     LayerOrigin::Flavor,
//!     [
//!         ("namespace", "com.example.app"),
//!         ("applicationId", "com.example.app"),
//!     ],
//! );
//!
//! let report = resolve(&registry, &[layer]).unwrap();
//! assert_eq!(report.config.get_i64("compileSdk"), Some(35));
//! assert_eq!(report.config.source_of("namespace"), Some("app"));
//! ```

pub mod config;
pub mod error;
pub mod layer;
pub mod merge;
pub mod report;
pub mod resolved;
pub mod schema;
pub mod validate;
pub mod value;

pub use config::{
    ASSIGNMENTS_LAYER, GLOBAL_LAYER, LayerEntry, MANIFEST_FILE, Project, ProjectLoader,
    ProjectManifest,
};
pub use error::{Error, Result};
pub use layer::{ConfigLayer, DEFAULTS_LAYER, LayerOrigin, LayerSource};
pub use merge::{check_layer, merge};
pub use report::{ReportOptions, ResolutionReport, Resolver, resolve};
pub use resolved::{ResolvedConfig, ResolvedValue};
pub use schema::{ConfigField, FieldRegistry, Predicate};
pub use validate::{Check, Diagnostic, Severity, Validator};
pub use value::{ConfigValue, FieldType};
