//! Preset definition schema - loaded from `<presets>/**/<type>.toml`
//!
//! A preset supplies default scripts and environment for one component type.
//!
//! # Example TOML
//!
//! ```toml
//! gitignore = ["target/"]
//!
//! [metadata]
//! type = "rust"
//! role = "language"
//! manifest_file = "Cargo.toml"
//! required_tools = ["cargo"]
//!
//! [scripts]
//! run = "cargo run"
//!
//! [env]
//! RUST_LOG = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete preset definition loaded from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PresetDefinition {
    /// Patterns `init` writes into `.gitignore`
    #[serde(default)]
    pub gitignore: Vec<String>,
    #[serde(default)]
    pub metadata: PresetMeta,
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// Preset metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PresetMeta {
    #[serde(rename = "type", default)]
    pub type_name: String,
    /// Free-form role, scored through the role-priority table
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub description: String,
    /// Dependency manifest filename written by `sync`
    #[serde(default)]
    pub manifest_file: Option<String>,
    #[serde(default)]
    pub required_tools: Vec<String>,
}

impl PresetDefinition {
    pub fn role(&self) -> &str {
        &self.metadata.role
    }

    /// Declared dependency manifest filename; an empty string counts as none.
    pub fn manifest_file(&self) -> Option<&str> {
        self.metadata
            .manifest_file
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}
