//! Dependency lists and the per-component dependency manifest file

use crate::project::Project;
use crate::Result;
use mngproj_fs::write_text;
use std::path::PathBuf;

impl Project {
    /// Add `package` to a component's dependencies, persist the manifest and
    /// regenerate the dependency manifest file.
    ///
    /// Returns whether the package was newly added; an existing entry still
    /// persists and regenerates.
    pub fn add_dependency(&mut self, component: &str, package: &str) -> Result<bool> {
        let added = self.component_mut(component)?.add_dependency(package);
        tracing::debug!(component, package, added, "add dependency");
        self.save()?;
        self.write_dependency_manifest(component)?;
        Ok(added)
    }

    /// Drop `package` from a component's dependencies, persist and regenerate.
    pub fn remove_dependency(&mut self, component: &str, package: &str) -> Result<bool> {
        let removed = self.component_mut(component)?.remove_dependency(package);
        tracing::debug!(component, package, removed, "remove dependency");
        self.save()?;
        self.write_dependency_manifest(component)?;
        Ok(removed)
    }

    /// Write `<component dir>/<manifest_file>` with one dependency per line.
    ///
    /// Skipped when the component resolves to no manifest filename, or when it
    /// has no dependencies and the file does not exist yet. Returns the path
    /// written, if any.
    pub fn write_dependency_manifest(&self, component: &str) -> Result<Option<PathBuf>> {
        let resolved = self.resolve(component)?;
        let Some(manifest_file) = resolved.manifest_file.as_deref() else {
            return Ok(None);
        };

        let dependencies = &self.component(component)?.dependencies;
        let path = resolved.abs_path.join(manifest_file);
        if dependencies.is_empty() && !path.exists() {
            return Ok(None);
        }

        let content: String = dependencies.iter().map(|d| format!("{d}\n")).collect();
        write_text(&path, &content)?;
        tracing::debug!(path = %path.display(), count = dependencies.len(), "wrote dependency manifest");
        Ok(Some(path))
    }
}
