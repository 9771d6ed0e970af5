//! Init command implementation
//!
//! Scaffolds `mngproj.toml` and `.gitignore` in a directory.

use std::path::Path;

use colored::Colorize;
use mngproj_fs::{ProjectPath, write_text};
use mngproj_meta::PresetSource;

use crate::error::{CliError, Result};

/// Run the init command
pub fn run_init(dir: &Path, presets: &dyn PresetSource, type_name: &str) -> Result<()> {
    if type_name.is_empty()
        || !type_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CliError::user(format!(
            "Invalid type '{}'. Use letters, digits, '-' or '_'.",
            type_name
        )));
    }

    let manifest = dir.join(ProjectPath::Manifest);
    if manifest.exists() {
        return Err(CliError::user(format!(
            "{} already exists in {}",
            ProjectPath::Manifest,
            dir.display()
        )));
    }

    println!(
        "{} Initializing new {} (type: {})...",
        "=>".blue().bold(),
        ProjectPath::Manifest,
        type_name.cyan()
    );
    write_text(&manifest, &generate_manifest(type_name))?;
    println!("Created {}", ProjectPath::Manifest);

    let patterns = match presets.load(type_name) {
        Ok(preset) => preset.gitignore,
        Err(e) => {
            println!(
                "{} failed to load '{}' preset for gitignore: {} (dir: {})",
                "warning:".yellow().bold(),
                type_name,
                e,
                presets.location()
            );
            Vec::new()
        }
    };
    match write_text(&dir.join(ProjectPath::GitIgnore), &generate_gitignore(&patterns)) {
        Ok(()) => println!("Created {}", ProjectPath::GitIgnore),
        Err(e) => println!(
            "{} failed to create {}: {}",
            "warning:".yellow().bold(),
            ProjectPath::GitIgnore,
            e
        ),
    }

    println!("{} Project initialized!", "OK".green().bold());
    Ok(())
}

/// Manifest with one component of the given type at the project root
pub fn generate_manifest(type_name: &str) -> String {
    let mut manifest = String::new();

    manifest.push_str("[project]\n");
    manifest.push_str("name = \"new-project\"\n");
    manifest.push_str("description = \"Created by mngproj init\"\n");

    manifest.push('\n');
    manifest.push_str("[[components]]\n");
    manifest.push_str("name = \"app\"\n");
    manifest.push_str(&format!("type = \"{}\"\n", type_name));
    manifest.push_str("path = \".\"\n");

    manifest
}

/// Ignore file: the local libs directory plus the preset's patterns
pub fn generate_gitignore(patterns: &[String]) -> String {
    let mut content = format!("# mngproj generated\n{}/\n", ProjectPath::LibsDir);
    for pattern in patterns {
        content.push_str(pattern);
        content.push('\n');
    }
    content
}
