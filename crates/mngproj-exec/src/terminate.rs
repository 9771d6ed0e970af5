//! Stopping running scripts

use crate::launcher::ProcessHandle;
use async_trait::async_trait;
use std::sync::Arc;

/// Stops a running script and everything it started.
///
/// After `terminate` returns the process has been reaped.
#[async_trait]
pub trait Terminator: Send + Sync {
    async fn terminate(&self, process: &mut ProcessHandle);
}

/// SIGKILL the process group the script leads.
#[cfg(unix)]
pub(crate) fn signal_group(pid: u32) {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let Ok(pid) = i32::try_from(pid) else {
        return;
    };
    if let Err(e) = kill(Pid::from_raw(-pid), Signal::SIGKILL) {
        // ESRCH: the group already exited
        tracing::debug!(pid, "group kill failed: {}", e);
    }
}

/// Kills the whole process group of the shell, so that servers started by a
/// script do not outlive it. Scripts sharing the terminal's group only get
/// their direct child killed.
#[cfg(unix)]
#[derive(Debug, Default, Clone, Copy)]
pub struct GroupKill;

#[cfg(unix)]
#[async_trait]
impl Terminator for GroupKill {
    async fn terminate(&self, process: &mut ProcessHandle) {
        if let Some(pgid) = process.process_group() {
            signal_group(pgid);
        }
        finish(process).await;
    }
}

/// Kills only the direct child.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectKill;

#[async_trait]
impl Terminator for DirectKill {
    async fn terminate(&self, process: &mut ProcessHandle) {
        finish(process).await;
    }
}

async fn finish(process: &mut ProcessHandle) {
    if let Err(e) = process.start_kill() {
        tracing::debug!(component = process.component(), "kill failed: {}", e);
    }
    match process.reap().await {
        Ok(status) => tracing::debug!(component = process.component(), %status, "terminated"),
        Err(e) => tracing::warn!(component = process.component(), "failed to reap process: {}", e),
    }
}

/// Group kill where process groups exist, direct kill elsewhere
pub fn default_terminator() -> Arc<dyn Terminator> {
    #[cfg(unix)]
    {
        Arc::new(GroupKill)
    }
    #[cfg(not(unix))]
    {
        Arc::new(DirectKill)
    }
}
