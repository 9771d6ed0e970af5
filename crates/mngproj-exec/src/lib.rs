//! Process execution and supervision for mngproj
//!
//! Materialized scripts run through the platform shell. On top of single
//! launches this crate provides:
//!
//! - **Sinks**: line-oriented forwarding of child output, tagged per component
//! - **Parallel runs**: one script across many components ([`run_parallel`])
//! - **Watching**: restart a component's script when its files change
//!   ([`watch_component`])
//!
//! Everything here needs a Tokio runtime.

pub mod error;
pub mod launcher;
pub mod sink;
pub mod supervisor;
pub mod terminate;
pub mod watch;

pub use error::{Error, ExitCode, Result};
pub use launcher::{Launcher, ProcessHandle, spawn};
pub use sink::{CaptureSink, LineSink, PrefixedSink, SharedWriter, Sinks};
pub use supervisor::{RunOutcome, TargetSelection, run_parallel, select_targets};
#[cfg(unix)]
pub use terminate::GroupKill;
pub use terminate::{DirectKill, Terminator, default_terminator};
pub use watch::{ChangeDetector, WatchOptions, watch_component, watch_components};
