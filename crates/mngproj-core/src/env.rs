//! Environment construction for script execution

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

/// Absolute project root, injected into every script environment
pub const PROJECT_ROOT_VAR: &str = "MNGPROJ_ROOT";
/// Absolute component directory, injected into every script environment
pub const COMPONENT_ROOT_VAR: &str = "MNGPROJ_COMPONENT_ROOT";
/// Short alias for [`COMPONENT_ROOT_VAR`], recognised during expansion only
pub const COMPONENT_ROOT_ALIAS: &str = "COMPONENT_ROOT";

/// `${NAME}` or `$NAME`
static VAR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("Invalid variable regex")
});

/// Replace `$VAR` and `${VAR}` references using `lookup`.
///
/// Unknown variables expand to the empty string. A `$` not followed by a
/// variable name is kept literally.
pub fn expand_vars(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    VAR_REGEX
        .replace_all(input, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            lookup(name).unwrap_or_default()
        })
        .into_owned()
}

/// Snapshot of the current process environment, skipping non-UTF-8 entries.
pub fn inherited_env() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

/// Build the environment a script runs with.
///
/// Starts from `inherited`, overlays each `overlay` entry after expanding it
/// against the project variables and `inherited`, then force-sets
/// [`PROJECT_ROOT_VAR`] and [`COMPONENT_ROOT_VAR`].
pub fn script_env(
    inherited: BTreeMap<String, String>,
    overlay: &BTreeMap<String, String>,
    project_root: &Path,
    component_root: &Path,
) -> BTreeMap<String, String> {
    let project_root = project_root.display().to_string();
    let component_root = component_root.display().to_string();

    let lookup = |name: &str| match name {
        PROJECT_ROOT_VAR => Some(project_root.clone()),
        COMPONENT_ROOT_VAR | COMPONENT_ROOT_ALIAS => Some(component_root.clone()),
        _ => inherited.get(name).cloned(),
    };

    let expanded: Vec<(String, String)> = overlay
        .iter()
        .map(|(key, value)| (key.clone(), expand_vars(value, &lookup)))
        .collect();

    let mut env = inherited;
    env.extend(expanded);
    env.insert(PROJECT_ROOT_VAR.to_string(), project_root.clone());
    env.insert(COMPONENT_ROOT_VAR.to_string(), component_root.clone());
    env
}
