//! Restarting a component's script when its files change

use crate::error::Result;
use crate::launcher::{Launcher, ProcessHandle};
use crate::sink::{LineSink, PrefixedSink, Sinks};
use crate::terminate::Terminator;
use mngproj_fs::{GENERATED_DIRS, TreeFilter, latest_modification};
use std::path::PathBuf;
use std::process::ExitStatus;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;

/// Script restarted by the watch loop unless configured otherwise
pub const DEFAULT_WATCH_SCRIPT: &str = "run";

#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Delay between two scans of the component tree
    pub interval: Duration,
    /// Directory names never scanned, in addition to dot-directories
    pub ignored_dirs: Vec<String>,
    pub script: String,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            ignored_dirs: GENERATED_DIRS.iter().map(|d| d.to_string()).collect(),
            script: DEFAULT_WATCH_SCRIPT.to_string(),
        }
    }
}

/// Turns a series of "latest mtime" measurements into change events.
///
/// The first measurement only sets the baseline. A later measurement that is
/// strictly newer than the baseline is a change and becomes the new baseline.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    baseline: Option<Option<SystemTime>>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a measurement, returning whether it counts as a change.
    pub fn observe(&mut self, latest: Option<SystemTime>) -> bool {
        match self.baseline {
            None => {
                self.baseline = Some(latest);
                false
            }
            Some(baseline) if latest > baseline => {
                self.baseline = Some(latest);
                true
            }
            Some(_) => false,
        }
    }
}

enum WatchEvent {
    Restart,
    Exited(std::io::Result<ExitStatus>),
}

/// Aborts the task when dropped
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Run a component's script and restart it whenever its directory changes.
///
/// Runs until the returned future is dropped, which also stops the current
/// process. Only resolving the component up front can fail; launch errors are
/// written to the component's stream as `Start Error: ...`.
pub async fn watch_component(
    launcher: Launcher,
    component: String,
    options: WatchOptions,
    writer: Arc<dyn LineSink>,
    terminator: Arc<dyn Terminator>,
) -> Result<()> {
    let resolved = launcher.project().resolve(&component)?;
    let status: Arc<dyn LineSink> = Arc::new(PrefixedSink::new(&component, writer.clone()));
    status.write_line(&format!(
        "Watching {} for changes...",
        resolved.abs_path.display()
    ));

    let (restart_tx, mut restart_rx) = mpsc::channel::<()>(1);
    let _ = restart_tx.try_send(());

    let _poller = AbortOnDrop(tokio::spawn(poll_changes(
        resolved.abs_path,
        TreeFilter::new(options.ignored_dirs),
        options.interval,
        restart_tx,
        status.clone(),
    )));

    let mut current: Option<ProcessHandle> = None;
    loop {
        // A script that exits on its own is reaped right away but kept as
        // `current` so its leftover group is killed on the next restart.
        let event = match current.as_mut() {
            Some(process) if process.pid().is_some() => tokio::select! {
                request = restart_rx.recv() => request.map(|()| WatchEvent::Restart),
                status = process.exited() => Some(WatchEvent::Exited(status)),
            },
            _ => restart_rx.recv().await.map(|()| WatchEvent::Restart),
        };
        match event {
            None => break,
            Some(WatchEvent::Exited(status)) => {
                match status {
                    Ok(status) => tracing::debug!(component = %component, %status, "script exited"),
                    Err(e) => {
                        tracing::warn!(component = %component, "failed to reap script: {}", e);
                        if let Some(mut process) = current.take() {
                            terminator.terminate(&mut process).await;
                        }
                    }
                }
                continue;
            }
            Some(WatchEvent::Restart) => {}
        }

        if let Some(mut process) = current.take() {
            terminator.terminate(&mut process).await;
        }
        let sink: Arc<dyn LineSink> = Arc::new(PrefixedSink::new(&component, writer.clone()));
        match launcher.launch_async(&component, &options.script, &[], Sinks::both(sink)) {
            Ok(process) => current = Some(process),
            Err(e) => {
                tracing::warn!(component = %component, "restart failed: {}", e);
                status.write_line(&format!("Start Error: {e}"));
            }
        }
    }
    Ok(())
}

/// Scan `root` every `interval` and post a restart request on change.
async fn poll_changes(
    root: PathBuf,
    filter: TreeFilter,
    interval: Duration,
    restart: mpsc::Sender<()>,
    status: Arc<dyn LineSink>,
) {
    let mut detector = ChangeDetector::new();
    loop {
        let scan = {
            let root = root.clone();
            let filter = filter.clone();
            tokio::task::spawn_blocking(move || latest_modification(&root, &filter)).await
        };
        let latest = match scan {
            Ok(latest) => latest,
            Err(e) => {
                tracing::warn!(root = %root.display(), "tree scan failed: {}", e);
                None
            }
        };
        tracing::debug!(root = %root.display(), ?latest, "scanned");

        if detector.observe(latest) {
            status.write_line("Change detected. Reloading...");
            match restart.try_send(()) {
                // Full: a restart is already pending
                Ok(()) | Err(TrySendError::Full(())) => {}
                Err(TrySendError::Closed(())) => break,
            }
        }
        tokio::time::sleep(interval).await;
    }
}

/// Watch several components at once. Never returns while any watch is alive.
///
/// A component that cannot be watched reports `Watch Error: ...` on its own
/// stream without affecting the others.
pub async fn watch_components(
    launcher: &Launcher,
    components: &[String],
    options: &WatchOptions,
    writer: Arc<dyn LineSink>,
    terminator: Arc<dyn Terminator>,
) {
    let tasks: Vec<_> = components
        .iter()
        .map(|component| {
            let launcher = launcher.clone();
            let component = component.clone();
            let options = options.clone();
            let writer = writer.clone();
            let terminator = terminator.clone();
            AbortOnDrop(tokio::spawn(async move {
                let status = PrefixedSink::new(&component, writer.clone());
                if let Err(e) =
                    watch_component(launcher, component.clone(), options, writer, terminator).await
                {
                    tracing::warn!(component = %component, "watch failed: {}", e);
                    status.write_line(&format!("Watch Error: {e}"));
                }
            }))
        })
        .collect();

    for mut task in tasks {
        let _ = (&mut task.0).await;
    }
}
