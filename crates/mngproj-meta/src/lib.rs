//! Manifest and preset metadata for mngproj.
//!
//! This crate defines the on-disk schemas (`mngproj.toml` and preset files),
//! the preset store used by resolution, and the role-priority table that
//! decides which preset wins a conflicting script.

pub mod error;
pub mod loader;
pub mod roles;
pub mod schema;

pub use error::{Error, Result};
pub use loader::{
    PRESETS_DIR_ENV, PresetDirectory, PresetMap, PresetSource, discover_presets_dir,
    resolve_presets_dir,
};
pub use roles::{DEFAULT_ROLE_PRIORITIES, RolePriorities};
pub use schema::{
    ComponentConfig, PresetDefinition, PresetMeta, ProjectConfig, ProjectMeta, ResolutionConfig,
};
