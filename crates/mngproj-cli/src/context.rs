//! Invocation context
//!
//! Commands run relative to the working directory: the project is found by
//! walking up from it, like git finds its repository.

use crate::error::Result;
use mngproj_core::Project;
use mngproj_meta::{PresetDirectory, PresetSource, resolve_presets_dir};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Context {
    pub cwd: PathBuf,
    pub presets_dir: PathBuf,
}

impl Context {
    /// Build a context, picking the presets directory from the flag or
    /// environment, the user's config directory, then `./presets`.
    pub fn new(cwd: PathBuf, presets_override: Option<PathBuf>) -> Self {
        let presets_dir = resolve_presets_dir(presets_override, dirs::home_dir());
        tracing::debug!(presets = %presets_dir.display(), "using presets directory");
        Self { cwd, presets_dir }
    }

    pub fn presets(&self) -> Arc<dyn PresetSource> {
        Arc::new(PresetDirectory::new(self.presets_dir.clone()))
    }

    /// Load the project enclosing the working directory.
    pub fn project(&self) -> Result<Project> {
        Ok(Project::discover(&self.cwd, self.presets())?)
    }

    /// `path` relative to the working directory, `.` for the directory itself
    pub fn relative(&self, path: &Path) -> PathBuf {
        match path.strip_prefix(&self.cwd) {
            Ok(rel) if rel.as_os_str().is_empty() => PathBuf::from("."),
            Ok(rel) => rel.to_path_buf(),
            Err(_) => path.to_path_buf(),
        }
    }
}
