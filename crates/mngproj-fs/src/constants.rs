//! Well-known file and directory names.

use std::path::Path;

/// Directory names treated as generated build or dependency output.
///
/// Skipped by tree scans in addition to every dot-prefixed directory.
pub const GENERATED_DIRS: &[&str] = &["node_modules", "target", "dist", "build"];

/// Fixed paths a project is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPath {
    /// The project manifest, `mngproj.toml`
    Manifest,
    /// The ignore file written by `init`
    GitIgnore,
    /// Local presets directory used as the development fallback
    LocalPresets,
    /// Isolated library directory some presets install into
    LibsDir,
}

impl ProjectPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => "mngproj.toml",
            Self::GitIgnore => ".gitignore",
            Self::LocalPresets => "presets",
            Self::LibsDir => ".libs",
        }
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ProjectPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
