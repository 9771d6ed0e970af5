//! Parallel runs and the watch loop
#![cfg(unix)]

use filetime::FileTime;
use mngproj_core::Project;
use mngproj_exec::{
    CaptureSink, LineSink, Launcher, WatchOptions, default_terminator, run_parallel,
    select_targets, watch_component,
};
use mngproj_meta::{PresetMap, PresetSource};
use mngproj_test_utils::TestProject;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

fn launcher(fixture: &TestProject) -> Launcher {
    let presets: Arc<dyn PresetSource> = Arc::new(PresetMap::new());
    let project = Project::load(&fixture.manifest_path(), presets).unwrap();
    Launcher::new(Arc::new(project))
}

/// Poll `capture` until `done` holds or the deadline passes.
async fn wait_for(capture: &CaptureSink, done: impl Fn(&CaptureSink) -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if done(capture) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    false
}

fn options() -> WatchOptions {
    WatchOptions {
        interval: Duration::from_millis(100),
        ..WatchOptions::default()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_parallel_failure_is_isolated() {
    let mut fixture = TestProject::new();
    fixture.manifest(
        r#"
[[components]]
name = "good"
groups = ["all"]
[components.scripts]
build = "echo ok"

[[components]]
name = "bad"
groups = ["all"]
[components.scripts]
build = "echo failing; exit 1"

[[components]]
name = "missing"
groups = ["all"]
"#,
    );
    let launcher = launcher(&fixture);
    let targets = select_targets(launcher.project(), &["all".to_string()]).targets;

    let capture = CaptureSink::new();
    let writer: Arc<dyn LineSink> = Arc::new(capture.clone());
    let outcomes = run_parallel(&launcher, &targets, "build", writer).await;

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].component, "good");
    assert!(outcomes[0].succeeded());
    assert_eq!(outcomes[1].component, "bad");
    assert!(!outcomes[1].succeeded());
    assert!(!outcomes[2].succeeded());

    assert!(capture.contains("[good] ok"));
    assert!(capture.contains("[bad] failing"));
    assert!(capture.contains("[bad] Error:"));
    assert!(capture.contains("[missing] Error:"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_watch_restarts_on_change_only() {
    let mut fixture = TestProject::new();
    fixture
        .manifest(
            r#"
[[components]]
name = "app"
path = "app"
[components.scripts]
run = "echo started"
"#,
        )
        .file("app/main.txt", "v1");
    let launcher = launcher(&fixture);

    let capture = CaptureSink::new();
    let writer: Arc<dyn LineSink> = Arc::new(capture.clone());
    let watch = tokio::spawn(watch_component(
        launcher,
        "app".to_string(),
        options(),
        writer,
        default_terminator(),
    ));

    assert!(wait_for(&capture, |c| c.count("[app] started") == 1).await);
    assert!(capture.contains("[app] Watching"));

    // Several scans with nothing touched
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(capture.count("[app] started"), 1);
    assert!(!capture.contains("Change detected"));

    let touched = fixture.root().join("app/main.txt");
    std::fs::write(&touched, "v2").unwrap();
    let future = SystemTime::now() + Duration::from_secs(30);
    filetime::set_file_mtime(&touched, FileTime::from_system_time(future)).unwrap();

    assert!(wait_for(&capture, |c| c.count("[app] started") >= 2).await);
    assert!(capture.contains("[app] Change detected. Reloading..."));

    watch.abort();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_watch_reports_start_errors() {
    let mut fixture = TestProject::new();
    fixture.manifest("[[components]]\nname = \"app\"\n");
    let launcher = launcher(&fixture);

    let capture = CaptureSink::new();
    let writer: Arc<dyn LineSink> = Arc::new(capture.clone());
    let watch = tokio::spawn(watch_component(
        launcher,
        "app".to_string(),
        options(),
        writer,
        default_terminator(),
    ));

    assert!(wait_for(&capture, |c| c.contains("[app] Start Error:")).await);
    watch.abort();
}

#[tokio::test]
async fn test_watch_unknown_component_fails() {
    let mut fixture = TestProject::new();
    fixture.manifest("[[components]]\nname = \"app\"\n");
    let result = watch_component(
        launcher(&fixture),
        "ghost".to_string(),
        options(),
        Arc::new(CaptureSink::new()),
        default_terminator(),
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_watch_reaps_script_that_exits() {
    let mut fixture = TestProject::new();
    fixture
        .manifest(
            r#"
[[components]]
name = "app"
path = "app"
[components.scripts]
run = "echo $$ > \"$MNGPROJ_ROOT/pid.txt\"; echo started"
"#,
        )
        .file("app/main.txt", "v1");
    let launcher = launcher(&fixture);

    let capture = CaptureSink::new();
    let writer: Arc<dyn LineSink> = Arc::new(capture.clone());
    let watch = tokio::spawn(watch_component(
        launcher,
        "app".to_string(),
        options(),
        writer,
        default_terminator(),
    ));
    assert!(wait_for(&capture, |c| c.count("[app] started") == 1).await);

    let pid: i32 = fixture.read("pid.txt").trim().parse().unwrap();
    let pid = nix::unistd::Pid::from_raw(pid);

    // A zombie still accepts signal 0; a reaped pid does not
    let deadline = Instant::now() + Duration::from_secs(10);
    while nix::sys::signal::kill(pid, None).is_ok() && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert_eq!(
        nix::sys::signal::kill(pid, None),
        Err(nix::errno::Errno::ESRCH)
    );

    watch.abort();
}
