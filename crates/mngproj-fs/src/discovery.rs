//! Locating project manifests on disk

use crate::constants::ProjectPath;
use crate::scan::TreeFilter;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Find `mngproj.toml` starting at `start` and walking up to the filesystem
/// root. Returns the path of the manifest file.
pub fn find_manifest(start: &Path) -> Result<PathBuf> {
    let start = dunce::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
    let mut dir = start.as_path();

    loop {
        let candidate = dir.join(ProjectPath::Manifest);
        if candidate.is_file() {
            tracing::debug!(manifest = %candidate.display(), "found manifest");
            return Ok(candidate);
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => {
                return Err(Error::ManifestNotFound {
                    file: ProjectPath::Manifest.to_string(),
                    start,
                });
            }
        }
    }
}

/// Find every directory beneath `root` (inclusive) holding a manifest.
///
/// Nested projects inside another project's tree are reported too. Hidden
/// and generated directories are not searched.
pub fn find_projects(root: &Path, filter: &TreeFilter) -> Vec<PathBuf> {
    filter
        .walk(root)
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.into_path())
        .filter(|dir| dir.join(ProjectPath::Manifest).is_file())
        .collect()
}
