//! Preset store: locating and loading preset definitions by type
//!
//! Presets live in a directory tree, one file per type:
//!
//! ```text
//! presets/
//!   languages/
//!     go.toml
//!     python.toml
//!     python_windows.toml   # preferred over python.toml on Windows
//!   frameworks/
//!     django.toml
//! ```

use crate::schema::PresetDefinition;
use crate::{Error, Result};
use mngproj_fs::{ConfigStore, ProjectPath};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Environment variable that overrides presets directory discovery
pub const PRESETS_DIR_ENV: &str = "MNGPROJ_PRESETS_DIR";

/// Source of preset definitions keyed by component type
pub trait PresetSource: Send + Sync {
    /// Load the preset for a type
    fn load(&self, type_name: &str) -> Result<PresetDefinition>;

    /// Human readable location, shown by `info`
    fn location(&self) -> String;
}

/// Presets read from a directory tree
#[derive(Debug, Clone)]
pub struct PresetDirectory {
    root: PathBuf,
    store: ConfigStore,
}

impl PresetDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            store: ConfigStore::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// First file named `file_name` anywhere beneath the root, in sorted walk order
    fn find(&self, file_name: &str) -> Option<PathBuf> {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .find(|entry| entry.file_type().is_file() && entry.file_name() == file_name)
            .map(|entry| entry.into_path())
    }

    fn read(&self, path: &Path) -> Result<PresetDefinition> {
        self.store.load(path).map_err(|e| match e {
            mngproj_fs::Error::ConfigParse { path, message, .. } => {
                Error::InvalidPreset { path, message }
            }
            other => Error::Fs(other),
        })
    }
}

impl PresetSource for PresetDirectory {
    fn load(&self, type_name: &str) -> Result<PresetDefinition> {
        let os_specific = format!("{}_{}.toml", type_name, env::consts::OS);
        if let Some(path) = self.find(&os_specific) {
            match self.read(&path) {
                Ok(preset) => {
                    tracing::debug!(preset = %path.display(), "Loaded OS-specific preset");
                    return Ok(preset);
                }
                Err(e) => {
                    tracing::warn!("Ignoring OS-specific preset {}: {}", path.display(), e);
                }
            }
        }

        let generic = format!("{}.toml", type_name);
        let path = self.find(&generic).ok_or_else(|| Error::PresetNotFound {
            type_name: type_name.to_string(),
            dir: self.root.clone(),
        })?;
        tracing::debug!(preset = %path.display(), "Loaded preset");
        self.read(&path)
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}

/// In-memory presets, keyed by type
#[derive(Debug, Clone, Default)]
pub struct PresetMap {
    presets: BTreeMap<String, PresetDefinition>,
}

impl PresetMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, type_name: impl Into<String>, preset: PresetDefinition) -> Self {
        self.insert(type_name, preset);
        self
    }

    pub fn insert(&mut self, type_name: impl Into<String>, preset: PresetDefinition) {
        self.presets.insert(type_name.into(), preset);
    }
}

impl PresetSource for PresetMap {
    fn load(&self, type_name: &str) -> Result<PresetDefinition> {
        self.presets
            .get(type_name)
            .cloned()
            .ok_or_else(|| Error::PresetNotFound {
                type_name: type_name.to_string(),
                dir: PathBuf::from("<memory>"),
            })
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

/// Pick the presets directory.
///
/// First match of: an explicit override, `<home>/.config/mngproj/presets`
/// when it exists, then `presets` relative to the working directory.
pub fn resolve_presets_dir(override_dir: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return dir;
    }
    if let Some(home) = home {
        let user_dir = home
            .join(".config")
            .join("mngproj")
            .join(ProjectPath::LocalPresets);
        if user_dir.is_dir() {
            return user_dir;
        }
    }
    PathBuf::from(ProjectPath::LocalPresets.as_str())
}

/// [`resolve_presets_dir`] fed from `MNGPROJ_PRESETS_DIR` and the home directory
pub fn discover_presets_dir() -> PathBuf {
    resolve_presets_dir(env::var_os(PRESETS_DIR_ENV).map(PathBuf::from), dirs::home_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_finds_preset_in_nested_directory() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "languages/go.toml",
            "[metadata]\ntype = \"go\"\nrole = \"language\"\n",
        );

        let presets = PresetDirectory::new(temp.path());
        let preset = presets.load("go").unwrap();
        assert_eq!(preset.metadata.type_name, "go");
        assert_eq!(preset.role(), "language");
    }

    #[test]
    fn test_os_specific_preset_preferred() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "tool.toml", "[scripts]\nrun = \"generic\"\n");
        write(
            temp.path(),
            &format!("os/tool_{}.toml", env::consts::OS),
            "[scripts]\nrun = \"native\"\n",
        );

        let preset = PresetDirectory::new(temp.path()).load("tool").unwrap();
        assert_eq!(preset.scripts["run"], "native");
    }

    #[test]
    fn test_broken_os_specific_preset_falls_back() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "tool.toml", "[scripts]\nrun = \"generic\"\n");
        write(
            temp.path(),
            &format!("tool_{}.toml", env::consts::OS),
            "this is not toml [[[",
        );

        let preset = PresetDirectory::new(temp.path()).load("tool").unwrap();
        assert_eq!(preset.scripts["run"], "generic");
    }

    #[test]
    fn test_missing_preset() {
        let temp = TempDir::new().unwrap();
        let err = PresetDirectory::new(temp.path()).load("cobol").unwrap_err();
        assert!(matches!(err, Error::PresetNotFound { ref type_name, .. } if type_name == "cobol"));
    }

    #[test]
    fn test_invalid_preset() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "bad.toml", "[metadata\n");
        let err = PresetDirectory::new(temp.path()).load("bad").unwrap_err();
        assert!(matches!(err, Error::InvalidPreset { .. }));
    }

    #[test]
    fn test_preset_map() {
        let map = PresetMap::new().with("go", PresetDefinition::default());
        assert!(map.load("go").is_ok());
        assert!(matches!(map.load("rust"), Err(Error::PresetNotFound { .. })));
    }

    #[test]
    fn test_presets_dir_override_wins() {
        let home = TempDir::new().unwrap();
        fs::create_dir_all(home.path().join(".config/mngproj/presets")).unwrap();
        let dir = resolve_presets_dir(
            Some(PathBuf::from("/custom")),
            Some(home.path().to_path_buf()),
        );
        assert_eq!(dir, PathBuf::from("/custom"));
    }

    #[test]
    fn test_presets_dir_uses_home_when_present() {
        let home = TempDir::new().unwrap();
        let user_dir = home.path().join(".config/mngproj/presets");
        fs::create_dir_all(&user_dir).unwrap();
        let dir = resolve_presets_dir(None, Some(home.path().to_path_buf()));
        assert_eq!(dir, user_dir);
    }

    #[test]
    fn test_presets_dir_falls_back_to_local() {
        let home = TempDir::new().unwrap();
        let dir = resolve_presets_dir(None, Some(home.path().to_path_buf()));
        assert_eq!(dir, PathBuf::from("presets"));
        assert_eq!(resolve_presets_dir(None, None), PathBuf::from("presets"));
    }
}
