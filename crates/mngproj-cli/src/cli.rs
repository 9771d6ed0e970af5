//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mngproj - Run and supervise the components of a multi-component project
#[derive(Parser, Debug)]
#[command(name = "mngproj")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding preset files
    #[arg(long, global = true, env = "MNGPROJ_PRESETS_DIR", value_name = "DIR")]
    pub presets_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Initialize a new project in the current directory
    ///
    /// Writes mngproj.toml with a single component and a .gitignore seeded
    /// from the preset of the given type.
    ///
    /// Examples:
    ///   mngproj init            # Go project
    ///   mngproj init python
    Init {
        /// Type of the initial component
        #[arg(default_value = "go", value_name = "TYPE")]
        type_name: String,
    },

    /// Run a component
    Run {
        component: String,

        /// Arguments passed to the script
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Build a component
    Build {
        component: String,

        /// Arguments passed to the script
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Add packages to a component and sync
    Add {
        component: String,

        #[arg(required = true, value_name = "PACKAGE")]
        packages: Vec<String>,
    },

    /// Remove packages from a component
    Remove {
        component: String,

        #[arg(required = true, value_name = "PACKAGE")]
        packages: Vec<String>,
    },

    /// Sync dependencies for the given components, or all of them
    Sync {
        #[arg(value_name = "COMPONENT")]
        components: Vec<String>,
    },

    /// Run components in parallel with aggregated logs
    ///
    /// Arguments may name components or groups; none starts everything.
    Up {
        #[arg(value_name = "COMPONENT|GROUP")]
        targets: Vec<String>,
    },

    /// Watch for changes and restart (hot reload)
    Watch {
        #[arg(value_name = "COMPONENT")]
        components: Vec<String>,

        /// Milliseconds between scans of each component directory
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },

    /// List components of the current project
    Ls,

    /// List all projects in the current directory tree
    Lsproj,

    /// Print the current project's components as JSON
    Query,

    /// Show current project info
    Info,

    /// Run a custom script: mngproj <script> <component> [args...]
    #[command(external_subcommand)]
    Script(Vec<String>),
}
