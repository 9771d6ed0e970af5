//! Turning a resolved script into a runnable command line

use crate::env::{inherited_env, script_env};
use crate::project::Project;
use crate::resolve::ResolvedComponent;
use crate::template;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Script bodies starting with this prefix are read from a file.
pub const FILE_PREFIX: &str = "file:";

/// Everything needed to spawn one script invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedScript {
    pub component: String,
    pub script: String,
    /// Final text handed to the platform shell
    pub command_line: String,
    /// Complete process environment
    pub env: BTreeMap<String, String>,
    pub working_dir: PathBuf,
}

impl Project {
    /// Materialize `script` for `resolved` against the current process environment.
    pub fn materialize(
        &self,
        resolved: &ResolvedComponent,
        script: &str,
        args: &[String],
    ) -> Result<MaterializedScript> {
        self.materialize_with_env(resolved, script, args, inherited_env())
    }

    /// Materialize against an explicit inherited environment.
    ///
    /// The script body is looked up, a `file:` body is replaced by the file's
    /// contents, and then either rendered as a template (when it contains
    /// `{{`) or has `args` appended space-separated.
    pub fn materialize_with_env(
        &self,
        resolved: &ResolvedComponent,
        script: &str,
        args: &[String],
        inherited: BTreeMap<String, String>,
    ) -> Result<MaterializedScript> {
        let body = resolved
            .script(script)
            .ok_or_else(|| Error::ScriptNotDefined {
                component: resolved.name.clone(),
                script: script.to_string(),
            })?;

        let env = script_env(inherited, &resolved.env, self.root(), &resolved.abs_path);
        let body = self.load_body(body)?;

        let command_line = if body.contains("{{") {
            template::render(&resolved.name, &body, args, &env)?
        } else if args.is_empty() {
            body
        } else {
            format!("{} {}", body, args.join(" "))
        };

        tracing::debug!(
            component = %resolved.name,
            script,
            command = %command_line,
            "materialized script"
        );

        Ok(MaterializedScript {
            component: resolved.name.clone(),
            script: script.to_string(),
            command_line,
            env,
            working_dir: resolved.abs_path.clone(),
        })
    }

    /// Resolve `component` and materialize one of its scripts.
    pub fn prepare(&self, component: &str, script: &str, args: &[String]) -> Result<MaterializedScript> {
        let resolved = self.resolve(component)?;
        self.materialize(&resolved, script, args)
    }

    fn load_body(&self, body: &str) -> Result<String> {
        let Some(rel) = body.strip_prefix(FILE_PREFIX) else {
            return Ok(body.to_string());
        };
        let path = Path::new(rel);
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root().join(path)
        };
        std::fs::read_to_string(&path).map_err(|source| Error::ScriptFileUnreadable { path, source })
    }
}
