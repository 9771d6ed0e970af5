//! Running a single script of one component

use std::sync::Arc;

use clap::CommandFactory;
use mngproj_exec::{Launcher, Sinks};

use crate::cli::Cli;
use crate::commands::runtime;
use crate::context::Context;
use crate::error::{CliError, Result};

/// Run `script` of `component` in the foreground with inherited stdio.
pub fn run_script(ctx: &Context, component: &str, script: &str, args: &[String]) -> Result<()> {
    let launcher = Launcher::new(Arc::new(ctx.project()?));
    runtime()?.block_on(launcher.run(component, script, args, Sinks::inherit()))?;
    Ok(())
}

/// `mngproj <script> <component> [args...]`
pub fn run_custom(ctx: &Context, argv: &[String]) -> Result<()> {
    match argv {
        [script, component, args @ ..] => run_script(ctx, component, script, args),
        [script] => {
            println!("Unknown command '{}'.", script);
            println!(
                "If this is a custom script, usage is: mngproj <script> <component> [args...]"
            );
            let _ = Cli::command().print_help();
            Err(CliError::user(format!("unknown command '{}'", script)))
        }
        [] => Err(CliError::user("no command given")),
    }
}
