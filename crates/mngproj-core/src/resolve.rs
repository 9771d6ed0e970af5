//! Component resolution: layering presets and inline overrides
//!
//! For each declared type, in order, the type's preset is loaded and scored
//! by its role:
//!
//! - the dependency manifest filename is adopted only on a strictly higher
//!   score, so the earliest type wins a tie
//! - environment entries always overwrite, so the latest type wins
//! - a script is adopted when absent or when the score is at least the
//!   recorded one, so the latest type wins a tie
//!
//! The component's own `env` and `scripts` are applied last.

use crate::project::Project;
use crate::{Error, Result};
use mngproj_meta::{ComponentConfig, PresetSource, RolePriorities};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// One component's fully merged configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedComponent {
    pub name: String,
    /// First declared type; empty when none is declared
    pub primary_type: String,
    pub abs_path: PathBuf,
    pub manifest_file: Option<String>,
    pub env: BTreeMap<String, String>,
    pub scripts: BTreeMap<String, String>,
}

impl ResolvedComponent {
    pub fn script(&self, name: &str) -> Option<&str> {
        self.scripts.get(name).map(String::as_str)
    }
}

/// Join `rel` onto `root`, dropping `.` segments.
fn component_dir(root: &Path, rel: &str) -> PathBuf {
    root.join(rel)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Resolve `component` against a preset store and role table.
pub fn resolve_component(
    component: &ComponentConfig,
    project_root: &Path,
    presets: &dyn PresetSource,
    roles: &RolePriorities,
) -> Result<ResolvedComponent> {
    let types = component.declared_types();

    let mut resolved = ResolvedComponent {
        name: component.name.clone(),
        primary_type: types.first().map(|t| t.to_string()).unwrap_or_default(),
        abs_path: component_dir(project_root, &component.path),
        manifest_file: None,
        env: BTreeMap::new(),
        scripts: BTreeMap::new(),
    };

    let mut script_scores: BTreeMap<String, i64> = BTreeMap::new();
    let mut manifest_score = i64::MIN;

    for type_name in types {
        let preset = presets
            .load(type_name)
            .map_err(|e| Error::PresetLoadFailure {
                type_name: type_name.to_string(),
                reason: e.to_string(),
            })?;
        let score = roles.score(preset.role());
        tracing::debug!(
            component = %component.name,
            preset = type_name,
            role = preset.role(),
            score,
            "applying preset"
        );

        if let Some(manifest) = preset.manifest_file() {
            if score > manifest_score {
                resolved.manifest_file = Some(manifest.to_string());
                manifest_score = score;
            }
        }

        resolved.env.extend(preset.env.clone());

        for (script, command) in &preset.scripts {
            let wins = script_scores
                .get(script)
                .is_none_or(|recorded| score >= *recorded);
            if wins {
                resolved.scripts.insert(script.clone(), command.clone());
                script_scores.insert(script.clone(), score);
            }
        }
    }

    resolved.env.extend(component.env.clone());
    resolved.scripts.extend(component.scripts.clone());

    Ok(resolved)
}

impl Project {
    /// Resolve a component by name.
    ///
    /// # Errors
    ///
    /// - [`Error::ComponentNotFound`] when no component has that name
    /// - [`Error::PresetLoadFailure`] when a declared type has no loadable preset
    pub fn resolve(&self, name: &str) -> Result<ResolvedComponent> {
        let component = self.component(name)?;
        resolve_component(
            component,
            self.root(),
            self.presets(),
            &self.role_priorities(),
        )
    }
}
