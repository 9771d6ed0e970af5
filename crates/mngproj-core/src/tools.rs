//! Checking that the tools presets require are installed

use crate::project::Project;
use crate::{Error, Result};

impl Project {
    /// Required tools of every component's presets that are not on `PATH`,
    /// deduplicated in first-seen order.
    pub fn missing_tools(&self) -> Result<Vec<String>> {
        let mut missing: Vec<String> = Vec::new();
        for component in &self.config().components {
            for type_name in component.declared_types() {
                let preset = self
                    .presets()
                    .load(type_name)
                    .map_err(|e| Error::PresetLoadFailure {
                        type_name: type_name.to_string(),
                        reason: e.to_string(),
                    })?;
                for tool in &preset.metadata.required_tools {
                    if missing.contains(tool) {
                        continue;
                    }
                    match which::which(tool) {
                        Ok(path) => {
                            tracing::debug!(tool, path = %path.display(), "found required tool");
                        }
                        Err(_) => missing.push(tool.clone()),
                    }
                }
            }
        }
        Ok(missing)
    }

    /// Fail with [`Error::MissingTools`] when any required tool is absent.
    pub fn validate_tools(&self) -> Result<()> {
        let tools = self.missing_tools()?;
        if tools.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingTools { tools })
        }
    }
}
