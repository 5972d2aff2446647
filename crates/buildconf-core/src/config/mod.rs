//! Project configuration and layer stack assembly
//!
//! # Configuration Hierarchy
//!
//! Layers are merged in this order (later sources override earlier):
//!
//! 1. **Registry defaults** - built-in field defaults
//! 2. **Global defaults** - `~/.config/buildconf/defaults.toml`
//! 3. **Manifest layers** - `[[layers]]` entries of `buildconf.toml`
//! 4. **Layer files** - passed with `--layer`
//! 5. **Explicit values** - passed with `--set KEY=VALUE`
//!
//! # Example
//!
//! ```ignore
//! use buildconf_core::ProjectLoader;
//!
//! let report = ProjectLoader::new()
//!     .with_manifest("buildconf.toml")
//!     .load()?
//!     .resolve()?;
//! std::process::exit(report.exit_code());
//! ```

mod manifest;
mod resolver;

pub use manifest::{LayerEntry, MANIFEST_FILE, ProjectManifest};
pub use resolver::{ASSIGNMENTS_LAYER, GLOBAL_LAYER, Project, ProjectLoader};
