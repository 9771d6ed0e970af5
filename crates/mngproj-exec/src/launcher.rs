//! Spawning materialized scripts through the platform shell

use crate::error::{Error, ExitCode, Result};
use crate::sink::{LineSink, Sinks};
use mngproj_core::{MaterializedScript, Project};
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

/// Starts component scripts of one project.
#[derive(Debug, Clone)]
pub struct Launcher {
    project: Arc<Project>,
}

impl Launcher {
    pub fn new(project: Arc<Project>) -> Self {
        Self { project }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Resolve, materialize and start `script` of `component` without waiting.
    ///
    /// Must be called from within a Tokio runtime. When `sinks.out` is `None`
    /// the command line is echoed to stdout as `[component] Executing: <cmd>`.
    pub fn launch_async(
        &self,
        component: &str,
        script: &str,
        args: &[String],
        sinks: Sinks,
    ) -> Result<ProcessHandle> {
        let materialized = self.project.prepare(component, script, args)?;
        spawn(&materialized, sinks)
    }

    /// Start a script and wait for it to exit.
    pub async fn launch(
        &self,
        component: &str,
        script: &str,
        args: &[String],
        sinks: Sinks,
    ) -> Result<ExitStatus> {
        let mut handle = self.launch_async(component, script, args, sinks)?;
        Ok(handle.wait().await?)
    }

    /// Like [`Launcher::launch`], but a non-zero exit is an [`Error::ScriptFailed`].
    pub async fn run(
        &self,
        component: &str,
        script: &str,
        args: &[String],
        sinks: Sinks,
    ) -> Result<()> {
        let status = self.launch(component, script, args, sinks).await?;
        if status.success() {
            return Ok(());
        }
        Err(Error::ScriptFailed {
            component: component.to_string(),
            script: script.to_string(),
            code: status.code().map_or(ExitCode::Signal, ExitCode::Code),
        })
    }
}

fn shell_command(command_line: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("powershell");
        cmd.arg("-Command").arg(command_line);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command_line);
        cmd
    }
}

/// Start an already materialized script.
pub fn spawn(script: &MaterializedScript, sinks: Sinks) -> Result<ProcessHandle> {
    if sinks.out.is_none() {
        println!("[{}] Executing: {}", script.component, script.command_line);
    }

    let mut cmd = shell_command(&script.command_line);
    cmd.current_dir(&script.working_dir)
        .env_clear()
        .envs(&script.env)
        .stdin(Stdio::inherit())
        .stdout(if sinks.out.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        })
        .stderr(if sinks.err.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        })
        .kill_on_drop(true);

    // Supervised scripts lead their own group so the whole tree can be
    // signalled at once. Inherited scripts stay in the terminal's foreground
    // group to keep reading stdin and receiving Ctrl-C.
    let own_group = cfg!(unix) && sinks.out.is_some();
    #[cfg(unix)]
    if own_group {
        cmd.process_group(0);
    }

    let mut child = cmd.spawn().map_err(|source| Error::LaunchFailure {
        component: script.component.clone(),
        source,
    })?;
    tracing::debug!(
        component = %script.component,
        script = %script.script,
        pid = ?child.id(),
        "spawned"
    );

    let mut pumps = Vec::new();
    if let (Some(stdout), Some(sink)) = (child.stdout.take(), sinks.out) {
        pumps.push(pump(stdout, sink));
    }
    if let (Some(stderr), Some(sink)) = (child.stderr.take(), sinks.err) {
        pumps.push(pump(stderr, sink));
    }

    let pgid = child.id().filter(|_| own_group);
    Ok(ProcessHandle {
        component: script.component.clone(),
        child,
        pumps,
        pgid,
    })
}

/// Forward `reader` into `sink` one line at a time until EOF.
fn pump<R>(reader: R, sink: Arc<dyn LineSink>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    if buf.ends_with(b"\n") {
                        buf.pop();
                        if buf.ends_with(b"\r") {
                            buf.pop();
                        }
                    }
                    sink.write_line(&String::from_utf8_lossy(&buf));
                }
                Err(e) => {
                    tracing::debug!("output pump stopped: {}", e);
                    break;
                }
            }
        }
    })
}

/// A running script
#[derive(Debug)]
pub struct ProcessHandle {
    component: String,
    child: Child,
    pumps: Vec<JoinHandle<()>>,
    /// Group led by the script; kept after reaping until the group is killed
    pgid: Option<u32>,
}

impl ProcessHandle {
    pub fn component(&self) -> &str {
        &self.component
    }

    /// OS process id; `None` once the process has been reaped
    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    /// Wait for exit, then for all forwarded output to be delivered.
    pub async fn wait(&mut self) -> std::io::Result<ExitStatus> {
        let status = self.child.wait().await?;
        for pump in self.pumps.drain(..) {
            let _ = pump.await;
        }
        self.pgid = None;
        tracing::debug!(component = %self.component, %status, "exited");
        Ok(status)
    }

    /// Id of the process group the script leads, if it has one
    pub fn process_group(&self) -> Option<u32> {
        self.pgid
    }

    /// Reap the direct child as soon as it exits.
    ///
    /// Output keeps flowing and the process group stays known, so descendants
    /// still holding it can be killed later. Cancel safe.
    pub async fn exited(&mut self) -> std::io::Result<ExitStatus> {
        self.child.wait().await
    }

    /// Request a kill of the direct child.
    pub(crate) fn start_kill(&mut self) -> std::io::Result<()> {
        self.child.start_kill()
    }

    /// Reap the child without waiting on output still held open by descendants.
    pub(crate) async fn reap(&mut self) -> std::io::Result<ExitStatus> {
        let status = self.child.wait().await;
        for pump in self.pumps.drain(..) {
            pump.abort();
        }
        self.pgid = None;
        status
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        for pump in &self.pumps {
            pump.abort();
        }
        // kill_on_drop only reaches the shell; take its group down too
        #[cfg(unix)]
        if let Some(pgid) = self.process_group() {
            crate::terminate::signal_group(pgid);
        }
    }
}
