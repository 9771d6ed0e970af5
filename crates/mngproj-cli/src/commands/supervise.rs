//! Supervised commands: up and watch

use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use mngproj_exec::{
    Launcher, LineSink, SharedWriter, WatchOptions, default_terminator, run_parallel,
    select_targets, watch_components,
};

use crate::commands::runtime;
use crate::context::Context;
use crate::error::Result;

const UP_SCRIPT: &str = "run";

/// Run the up command
///
/// Every target's `run` script is started at once and its output tagged with
/// the component name. A failing component only reports `[name] Error: ...`;
/// the command itself succeeds once every target has finished.
pub fn run_up(ctx: &Context, args: &[String]) -> Result<()> {
    let project = ctx.project()?;
    let selection = select_targets(&project, args);
    for warning in &selection.warnings {
        println!("{}", warning.yellow());
    }
    if selection.targets.is_empty() {
        println!("No components found to start.");
        return Ok(());
    }

    println!(
        "Starting {} components: [{}]",
        selection.targets.len(),
        selection.targets.join(" ")
    );

    let launcher = Launcher::new(Arc::new(project));
    let writer: Arc<dyn LineSink> = Arc::new(SharedWriter::stdout());
    let outcomes = runtime()?.block_on(run_parallel(
        &launcher,
        &selection.targets,
        UP_SCRIPT,
        writer,
    ));

    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    tracing::debug!(total = outcomes.len(), failed, "all components finished");
    Ok(())
}

/// Run the watch command; returns only once every watch has stopped.
pub fn run_watch(ctx: &Context, components: &[String], interval_ms: u64) -> Result<()> {
    let project = ctx.project()?;
    let targets = if components.is_empty() {
        project.component_names()
    } else {
        components.to_vec()
    };

    let options = WatchOptions {
        interval: Duration::from_millis(interval_ms.max(1)),
        ..WatchOptions::default()
    };
    let launcher = Launcher::new(Arc::new(project));
    let writer: Arc<dyn LineSink> = Arc::new(SharedWriter::stdout());
    runtime()?.block_on(watch_components(
        &launcher,
        &targets,
        &options,
        writer,
        default_terminator(),
    ));
    Ok(())
}
