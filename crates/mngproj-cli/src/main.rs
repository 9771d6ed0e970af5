//! mngproj CLI
//!
//! Runs, builds and supervises the components declared in `mngproj.toml`.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Log to stderr so stdout only carries command and script output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    let ctx = Context::new(std::env::current_dir()?, cli.presets_dir);

    match cli.command {
        Some(cmd) => execute_command(&ctx, cmd),
        None => {
            println!(
                "{} Run and supervise multi-component projects",
                "mngproj".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "mngproj --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Init { type_name } => {
            commands::run_init(&ctx.cwd, &*ctx.presets(), &type_name)
        }
        Commands::Run { component, args } => commands::run_script(ctx, &component, "run", &args),
        Commands::Build { component, args } => {
            commands::run_script(ctx, &component, "build", &args)
        }
        Commands::Add {
            component,
            packages,
        } => commands::run_add(ctx, &component, &packages),
        Commands::Remove {
            component,
            packages,
        } => commands::run_remove(ctx, &component, &packages),
        Commands::Sync { components } => commands::run_sync(ctx, &components),
        Commands::Up { targets } => commands::run_up(ctx, &targets),
        Commands::Watch {
            components,
            interval_ms,
        } => commands::run_watch(ctx, &components, interval_ms),
        Commands::Ls => commands::run_ls(ctx),
        Commands::Lsproj => commands::run_lsproj(ctx),
        Commands::Query => commands::run_query(ctx),
        Commands::Info => commands::run_info(ctx),
        Commands::Script(argv) => commands::run_custom(ctx, &argv),
    }
}
