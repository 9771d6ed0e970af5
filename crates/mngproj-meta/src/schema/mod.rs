//! Schema definitions for the project manifest and presets
//!
//! - `mngproj.toml` - [`ProjectConfig`], one per project
//! - `<presets>/**/<type>.toml` - [`PresetDefinition`], one per component type

pub mod preset;
pub mod project;

pub use preset::{PresetDefinition, PresetMeta};
pub use project::{ComponentConfig, ProjectConfig, ProjectMeta, ResolutionConfig};
