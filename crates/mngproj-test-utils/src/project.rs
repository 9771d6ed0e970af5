//! [`TestProject`] builder for mngproj test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory with its own presets tree.
///
/// Layout:
///
/// ```text
/// <temp>/
///   project/          # root(), holds mngproj.toml
///   presets/          # presets_dir()
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use mngproj_test_utils::TestProject;
///
/// let mut project = TestProject::new();
/// project.preset("go", "[metadata]\ntype = \"go\"\n[scripts]\nrun = \"go run .\"\n");
/// project.manifest("[[components]]\nname = \"app\"\ntype = \"go\"\n");
/// project.assert_file_exists("mngproj.toml");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create empty project and presets directories.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("project")).unwrap();
        fs::create_dir_all(temp_dir.path().join("presets")).unwrap();
        Self { temp_dir }
    }

    /// Project root, where `mngproj.toml` lives.
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("project")
    }

    pub fn presets_dir(&self) -> PathBuf {
        self.temp_dir.path().join("presets")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root().join("mngproj.toml")
    }

    /// Write `mngproj.toml`, replacing any previous content.
    pub fn manifest(&mut self, content: &str) -> &mut Self {
        fs::write(self.manifest_path(), content).unwrap();
        self
    }

    /// Write `presets/<name>.toml`. `name` may contain subdirectories.
    pub fn preset(&mut self, name: &str, content: &str) -> &mut Self {
        let path = self.presets_dir().join(format!("{name}.toml"));
        write_with_parents(&path, content);
        self
    }

    /// Write a file relative to the project root.
    pub fn file(&mut self, rel: &str, content: &str) -> &mut Self {
        write_with_parents(&self.root().join(rel), content);
        self
    }

    /// Create a directory relative to the project root.
    pub fn dir(&mut self, rel: &str) -> &mut Self {
        fs::create_dir_all(self.root().join(rel)).unwrap();
        self
    }

    /// Read a file relative to the project root.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, rel: &str) -> String {
        let path = self.root().join(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that `rel` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, rel: &str) {
        let full_path = self.root().join(rel);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `rel` (relative to the project root) does **not** exist.
    pub fn assert_file_not_exists(&self, rel: &str) {
        let full_path = self.root().join(rel);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `rel` contains `content`.
    pub fn assert_file_contains(&self, rel: &str, content: &str) {
        let file_content = self.read(rel);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            rel,
            content,
            file_content
        );
    }
}

fn write_with_parents(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
