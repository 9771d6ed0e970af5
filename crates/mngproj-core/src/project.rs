//! A loaded project: manifest, resolved root and preset store

use crate::{Error, Result};
use mngproj_fs::find_manifest;
use mngproj_meta::{ComponentConfig, PresetSource, ProjectConfig, RolePriorities};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A project manifest bound to its location on disk and a preset store.
///
/// Every query is computed fresh from the manifest; nothing is cached
/// between calls. Share across tasks as `Arc<Project>`.
#[derive(Clone)]
pub struct Project {
    config: ProjectConfig,
    manifest_path: PathBuf,
    root: PathBuf,
    presets: Arc<dyn PresetSource>,
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("name", &self.config.project.name)
            .field("manifest_path", &self.manifest_path)
            .field("root", &self.root)
            .field("presets", &self.presets.location())
            .finish()
    }
}

impl Project {
    /// Load the manifest at `manifest_path`.
    pub fn load(manifest_path: &Path, presets: Arc<dyn PresetSource>) -> Result<Self> {
        let manifest_path = std::path::absolute(manifest_path)
            .map_err(|e| mngproj_fs::Error::io(manifest_path, e))?;
        let config = ProjectConfig::load(&manifest_path)?;
        Ok(Self::from_config(config, manifest_path, presets))
    }

    /// Find `mngproj.toml` at or above `start` and load it.
    pub fn discover(start: &Path, presets: Arc<dyn PresetSource>) -> Result<Self> {
        let manifest_path = find_manifest(start)?;
        Self::load(&manifest_path, presets)
    }

    /// Bind an already parsed manifest to its location.
    pub fn from_config(
        config: ProjectConfig,
        manifest_path: PathBuf,
        presets: Arc<dyn PresetSource>,
    ) -> Self {
        let manifest_dir = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let root = config.root_dir(&manifest_dir);
        tracing::debug!(root = %root.display(), presets = %presets.location(), "project loaded");
        Self {
            config,
            manifest_path,
            root,
            presets,
        }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.project.name
    }

    /// Absolute project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    pub fn presets(&self) -> &dyn PresetSource {
        self.presets.as_ref()
    }

    /// Default role table overlaid with the manifest's `[resolution]` overrides
    pub fn role_priorities(&self) -> RolePriorities {
        RolePriorities::with_overrides(&self.config.resolution.role_priority)
    }

    pub fn component(&self, name: &str) -> Result<&ComponentConfig> {
        self.config
            .component(name)
            .ok_or_else(|| Error::ComponentNotFound {
                name: name.to_string(),
            })
    }

    pub(crate) fn component_mut(&mut self, name: &str) -> Result<&mut ComponentConfig> {
        self.config
            .component_mut(name)
            .ok_or_else(|| Error::ComponentNotFound {
                name: name.to_string(),
            })
    }

    /// Component names in manifest order
    pub fn component_names(&self) -> Vec<String> {
        self.config
            .components
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    /// Names of the components in `group`, each once. Unknown groups are empty.
    pub fn components_in_group(&self, group: &str) -> Vec<String> {
        self.config
            .components_in_group(group)
            .into_iter()
            .map(|c| c.name.clone())
            .collect()
    }

    /// Persist the manifest back to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        self.config.save(&self.manifest_path)?;
        Ok(())
    }
}
