//! Field schema
//!
//! Declares the closed set of configuration keys, their types, defaults and
//! value predicates. Layers may only set keys registered here.

mod builtins;
mod field;
mod registry;

pub use builtins::{
    BUILD_TYPES, DEFAULT_JAVA_VERSION, DEFAULT_MIN_SDK, DEFAULT_NDK_VERSION, DEFAULT_SDK,
};
pub use field::{ConfigField, JAVA_VERSIONS, MAX_SDK_LEVEL, Predicate};
pub use registry::FieldRegistry;
