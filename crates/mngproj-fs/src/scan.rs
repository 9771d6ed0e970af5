//! Directory-tree scanning with ignore rules

use crate::constants::GENERATED_DIRS;
use std::path::Path;
use std::time::SystemTime;
use walkdir::{DirEntry, WalkDir};

/// Which directories a tree scan descends into.
///
/// Dot-prefixed directories and the configured generated-output names are
/// pruned. The scan root itself is never pruned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFilter {
    ignored_dirs: Vec<String>,
}

impl Default for TreeFilter {
    fn default() -> Self {
        Self::new(GENERATED_DIRS.iter().map(|d| d.to_string()))
    }
}

impl TreeFilter {
    /// Create a filter pruning the given directory names (plus hidden dirs).
    pub fn new(ignored_dirs: impl IntoIterator<Item = String>) -> Self {
        Self {
            ignored_dirs: ignored_dirs.into_iter().collect(),
        }
    }

    /// Directory names pruned in addition to hidden directories.
    pub fn ignored_dirs(&self) -> &[String] {
        &self.ignored_dirs
    }

    /// Whether a directory with this name is skipped.
    pub fn skips_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.ignored_dirs.iter().any(|d| d == name)
    }

    fn descends(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        !self.skips_dir(&entry.file_name().to_string_lossy())
    }

    /// Walk `root`, yielding every reachable entry. Unreadable entries are
    /// skipped silently.
    pub fn walk<'a>(&'a self, root: &Path) -> impl Iterator<Item = DirEntry> + use<'a> {
        WalkDir::new(root)
            .into_iter()
            .filter_entry(move |e| self.descends(e))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::trace!(error = %e, "skipping unreadable entry");
                    None
                }
            })
    }
}

/// Most recent modification time of any file beneath `root`.
///
/// Returns `None` when no file could be inspected (empty or missing tree).
pub fn latest_modification(root: &Path, filter: &TreeFilter) -> Option<SystemTime> {
    filter
        .walk(root)
        .filter(|e| !e.file_type().is_dir())
        .filter_map(|e| e.metadata().ok()?.modified().ok())
        .max()
}
