//! Command implementations for mngproj-cli

pub mod deps;
pub mod init;
pub mod list;
pub mod run;
pub mod supervise;

pub use deps::{run_add, run_remove, run_sync};
pub use init::run_init;
pub use list::{run_info, run_ls, run_lsproj, run_query};
pub use run::{run_custom, run_script};
pub use supervise::{run_up, run_watch};

use crate::error::Result;
use tokio::runtime::Runtime;

/// Runtime for commands that start processes
pub(crate) fn runtime() -> Result<Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}
