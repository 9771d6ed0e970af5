//! Running one script across many components at once

use crate::launcher::Launcher;
use crate::sink::{LineSink, PrefixedSink, Sinks};
use mngproj_core::Project;
use std::sync::Arc;

/// Components picked out of command line arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSelection {
    /// Component names, first-seen order, no duplicates
    pub targets: Vec<String>,
    /// One message per argument that matched nothing
    pub warnings: Vec<String>,
}

/// Expand arguments into component names.
///
/// No arguments selects every component. Otherwise each argument is taken as
/// a component name first, then as a group name.
pub fn select_targets(project: &Project, args: &[String]) -> TargetSelection {
    let mut selection = TargetSelection::default();
    if args.is_empty() {
        selection.targets = project.component_names();
        return selection;
    }

    for arg in args {
        let matched = if project.component(arg).is_ok() {
            vec![arg.clone()]
        } else {
            project.components_in_group(arg)
        };

        if matched.is_empty() {
            selection.warnings.push(format!(
                "Warning: Argument {arg:?} matches no component or group."
            ));
            continue;
        }
        for name in matched {
            if !selection.targets.contains(&name) {
                selection.targets.push(name);
            }
        }
    }
    selection
}

/// How one component's run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub component: String,
    pub error: Option<String>,
}

impl RunOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Run `script` for every target concurrently and wait for all of them.
///
/// Output lines go to `writer` tagged `[component]`. A failing component is
/// reported on its own tagged stream and does not stop the others. Outcomes
/// come back in target order.
pub async fn run_parallel(
    launcher: &Launcher,
    targets: &[String],
    script: &str,
    writer: Arc<dyn LineSink>,
) -> Vec<RunOutcome> {
    let tasks: Vec<_> = targets
        .iter()
        .map(|component| {
            let launcher = launcher.clone();
            let component = component.clone();
            let script = script.to_string();
            let sink: Arc<dyn LineSink> = Arc::new(PrefixedSink::new(&component, writer.clone()));
            let handle = tokio::spawn({
                let component = component.clone();
                async move {
                    launcher
                        .run(&component, &script, &[], Sinks::both(sink.clone()))
                        .await
                        .map_err(|e| {
                            sink.write_line(&format!("Error: {e}"));
                            e.to_string()
                        })
                }
            });
            (component, handle)
        })
        .collect();

    let mut outcomes = Vec::with_capacity(tasks.len());
    for (component, handle) in tasks {
        let error = match handle.await {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e),
            Err(join) => Some(format!("task failed: {join}")),
        };
        if let Some(e) = &error {
            tracing::warn!(component = %component, "run failed: {}", e);
        }
        outcomes.push(RunOutcome { component, error });
    }
    outcomes
}
