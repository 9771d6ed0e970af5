//! Project manifest schema - loaded from `mngproj.toml`
//!
//! # Example TOML
//!
//! ```toml
//! [project]
//! name = "shop"
//! root = "."
//!
//! [resolution.role_priority]
//! framework = 50
//!
//! [[components]]
//! name = "api"
//! types = ["python", "django", "uv"]
//! path = "services/api"
//! dependencies = ["requests"]
//! groups = ["backend"]
//!
//! [components.env]
//! PORT = "8000"
//!
//! [components.scripts]
//! lint = "ruff check ."
//! ```

use crate::{Error, Result};
use mngproj_fs::ConfigStore;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Complete manifest loaded from `mngproj.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub project: ProjectMeta,
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
    #[serde(default, skip_serializing_if = "ResolutionConfig::is_empty")]
    pub resolution: ResolutionConfig,
}

/// The `[project]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Project root, absolute or relative to the manifest's directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

/// The `[resolution]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolutionConfig {
    /// Per-role score overrides applied on top of the default table
    #[serde(default)]
    pub role_priority: BTreeMap<String, i64>,
}

impl ResolutionConfig {
    pub fn is_empty(&self) -> bool {
        self.role_priority.is_empty()
    }
}

/// One `[[components]]` entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ComponentConfig {
    pub name: String,
    /// Legacy single type, used only when `types` is empty
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(default)]
    pub path: String,
    /// Reserved; resolution does not consult it
    #[serde(default, skip_serializing_if = "is_zero")]
    pub priority: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scripts: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl ComponentConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: ".".to_string(),
            ..Self::default()
        }
    }

    /// Declared types in resolution order.
    ///
    /// A non-empty `types` list wins; otherwise the legacy `type` field
    /// becomes a one-element list; otherwise there are no types.
    pub fn declared_types(&self) -> Vec<&str> {
        if !self.types.is_empty() {
            self.types.iter().map(String::as_str).collect()
        } else if !self.type_name.is_empty() {
            vec![self.type_name.as_str()]
        } else {
            Vec::new()
        }
    }

    /// First declared type, if any
    pub fn primary_type(&self) -> Option<&str> {
        self.declared_types().first().copied()
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// Append a dependency unless already present. Returns whether it was added.
    pub fn add_dependency(&mut self, package: &str) -> bool {
        if self.dependencies.iter().any(|d| d == package) {
            return false;
        }
        self.dependencies.push(package.to_string());
        true
    }

    /// Drop every occurrence of a dependency. Returns whether anything changed.
    pub fn remove_dependency(&mut self, package: &str) -> bool {
        let before = self.dependencies.len();
        self.dependencies.retain(|d| d != package);
        before != self.dependencies.len()
    }
}

impl ProjectConfig {
    /// Load and validate a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let mut config: Self = ConfigStore::new().load(path)?;
        config.normalize()?;
        Ok(config)
    }

    /// Parse and validate manifest text; `path` is only used in error messages
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let mut config: Self = ConfigStore::new().parse(path, content)?;
        config.normalize()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        Ok(())
    }

    /// Reject duplicate component names and default empty paths to `"."`.
    fn normalize(&mut self) -> Result<()> {
        let mut seen = HashSet::new();
        for component in &mut self.components {
            if !seen.insert(component.name.clone()) {
                return Err(Error::DuplicateComponentName {
                    name: component.name.clone(),
                });
            }
            if component.path.is_empty() {
                component.path = ".".to_string();
            }
        }
        Ok(())
    }

    /// Resolve the project root given the directory holding the manifest.
    pub fn root_dir(&self, manifest_dir: &Path) -> PathBuf {
        match self.project.root.as_deref() {
            Some(root) if !root.is_empty() => {
                let root = Path::new(root);
                if root.is_absolute() {
                    root.to_path_buf()
                } else {
                    manifest_dir.join(root)
                }
            }
            _ => manifest_dir.to_path_buf(),
        }
    }

    pub fn component(&self, name: &str) -> Option<&ComponentConfig> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn component_mut(&mut self, name: &str) -> Option<&mut ComponentConfig> {
        self.components.iter_mut().find(|c| c.name == name)
    }

    /// Members of a group in manifest order, each at most once
    pub fn components_in_group(&self, group: &str) -> Vec<&ComponentConfig> {
        self.components.iter().filter(|c| c.in_group(group)).collect()
    }
}
