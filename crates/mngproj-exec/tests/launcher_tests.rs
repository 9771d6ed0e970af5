//! Launching scripts through the shell and collecting their output
#![cfg(unix)]

use mngproj_core::Project;
use mngproj_exec::{CaptureSink, Error, ExitCode, Launcher, Sinks, Terminator, default_terminator};
use mngproj_meta::{PresetDirectory, PresetSource};
use mngproj_test_utils::TestProject;
use std::sync::Arc;

fn launcher(fixture: &TestProject) -> Launcher {
    let presets: Arc<dyn PresetSource> = Arc::new(PresetDirectory::new(fixture.presets_dir()));
    let project = Project::load(&fixture.manifest_path(), presets).unwrap();
    Launcher::new(Arc::new(project))
}

fn fixture() -> TestProject {
    let mut fixture = TestProject::new();
    fixture
        .preset(
            "shell",
            r#"
[metadata]
type = "shell"
role = "language"

[scripts]
greet = "echo {{range .Args}}{{.}} {{end}}"
env = "echo {{.Env.MY_VAR}}"
root = "echo $MNGPROJ_COMPONENT_ROOT"
"#,
        )
        .manifest(
            r#"
[project]
name = "launch"

[[components]]
name = "svc"
type = "shell"
path = "svc"

[components.env]
MY_VAR = "hello_world"

[components.scripts]
fromfile = "file:script.sh"
marker = "cat marker.txt"
fail = "exit 3"
stderr = "echo oops 1>&2"
"#,
        )
        .file("script.sh", "echo from file")
        .file("svc/marker.txt", "inside svc");
    fixture
}

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

async fn capture(launcher: &Launcher, script: &str, script_args: &[String]) -> CaptureSink {
    let capture = CaptureSink::new();
    let status = launcher
        .launch("svc", script, script_args, Sinks::both(Arc::new(capture.clone())))
        .await
        .unwrap();
    assert!(status.success(), "{script} exited with {status}");
    capture
}

#[tokio::test]
async fn test_template_args_reach_the_shell() {
    let fixture = fixture();
    let out = capture(&launcher(&fixture), "greet", &args(&["foo", "bar"])).await;
    assert!(out.contains("foo bar"), "{:?}", out.lines());
}

#[tokio::test]
async fn test_inline_env_renders_into_template() {
    let fixture = fixture();
    let out = capture(&launcher(&fixture), "env", &[]).await;
    assert_eq!(out.lines(), vec!["hello_world"]);
}

#[tokio::test]
async fn test_file_script_runs_file_contents() {
    let fixture = fixture();
    let out = capture(&launcher(&fixture), "fromfile", &[]).await;
    assert!(out.contains("from file"));
}

#[tokio::test]
async fn test_runs_in_component_directory() {
    let fixture = fixture();
    let out = capture(&launcher(&fixture), "marker", &[]).await;
    assert_eq!(out.lines(), vec!["inside svc"]);
}

#[tokio::test]
async fn test_component_root_is_injected() {
    let fixture = fixture();
    let out = capture(&launcher(&fixture), "root", &[]).await;
    let expected = fixture.root().join("svc");
    assert_eq!(out.lines(), vec![expected.display().to_string()]);
}

#[tokio::test]
async fn test_stderr_goes_to_err_sink() {
    let fixture = fixture();
    let out = CaptureSink::new();
    let err = CaptureSink::new();
    let sinks = Sinks {
        out: Some(Arc::new(out.clone())),
        err: Some(Arc::new(err.clone())),
    };
    launcher(&fixture).launch("svc", "stderr", &[], sinks).await.unwrap();
    assert!(out.lines().is_empty());
    assert_eq!(err.lines(), vec!["oops"]);
}

#[tokio::test]
async fn test_non_zero_exit_is_script_failed() {
    let fixture = fixture();
    let result = launcher(&fixture)
        .run("svc", "fail", &[], Sinks::both(Arc::new(CaptureSink::new())))
        .await;
    match result {
        Err(Error::ScriptFailed { component, script, code }) => {
            assert_eq!(component, "svc");
            assert_eq!(script, "fail");
            assert_eq!(code, ExitCode::Code(3));
        }
        other => panic!("expected ScriptFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_undefined_script_fails_before_spawn() {
    let fixture = fixture();
    let result = launcher(&fixture).launch_async("svc", "deploy", &[], Sinks::inherit());
    assert!(matches!(
        result,
        Err(Error::Core(mngproj_core::Error::ScriptNotDefined { .. }))
    ));
}

#[tokio::test]
async fn test_unknown_component() {
    let fixture = fixture();
    let result = launcher(&fixture).launch_async("ghost", "run", &[], Sinks::inherit());
    assert!(matches!(
        result,
        Err(Error::Core(mngproj_core::Error::ComponentNotFound { .. }))
    ));
}

#[tokio::test]
async fn test_terminate_reaps_long_running_script() {
    let mut fixture = fixture();
    fixture.manifest(
        r#"
[[components]]
name = "svc"
path = "svc"

[components.scripts]
serve = "sleep 30"
"#,
    );
    let launcher = launcher(&fixture);
    let mut process = launcher
        .launch_async("svc", "serve", &[], Sinks::both(Arc::new(CaptureSink::new())))
        .unwrap();
    assert!(process.pid().is_some());

    let started = std::time::Instant::now();
    default_terminator().terminate(&mut process).await;
    assert!(process.pid().is_none());
    assert!(started.elapsed() < std::time::Duration::from_secs(10));
}

fn sleeper() -> TestProject {
    let mut fixture = fixture();
    fixture.manifest(
        r#"
[[components]]
name = "svc"
path = "svc"

[components.scripts]
serve = "sleep 30"
brief = "sleep 0.2"
"#,
    );
    fixture
}

fn group_of(pid: u32) -> nix::unistd::Pid {
    nix::unistd::getpgid(Some(nix::unistd::Pid::from_raw(pid as i32))).unwrap()
}

#[tokio::test]
async fn test_inherited_script_stays_in_foreground_group() {
    let fixture = sleeper();
    let mut process = launcher(&fixture)
        .launch_async("svc", "serve", &[], Sinks::inherit())
        .unwrap();

    // Sharing our group keeps terminal reads and Ctrl-C working
    let pid = process.pid().unwrap();
    assert_eq!(group_of(pid), nix::unistd::getpgrp());
    assert_eq!(process.process_group(), None);

    default_terminator().terminate(&mut process).await;
    assert!(process.pid().is_none());
}

#[tokio::test]
async fn test_captured_script_leads_its_own_group() {
    let fixture = sleeper();
    let mut process = launcher(&fixture)
        .launch_async("svc", "serve", &[], Sinks::both(Arc::new(CaptureSink::new())))
        .unwrap();

    let pid = process.pid().unwrap();
    assert_eq!(group_of(pid), nix::unistd::Pid::from_raw(pid as i32));
    assert_eq!(process.process_group(), Some(pid));

    default_terminator().terminate(&mut process).await;
    assert_eq!(process.process_group(), None);
}

#[tokio::test]
async fn test_exited_reaps_but_keeps_group_for_cleanup() {
    let fixture = sleeper();
    let mut process = launcher(&fixture)
        .launch_async("svc", "brief", &[], Sinks::both(Arc::new(CaptureSink::new())))
        .unwrap();
    let pid = process.pid().unwrap();

    let status = process.exited().await.unwrap();
    assert!(status.success());
    assert!(process.pid().is_none());
    assert_eq!(process.process_group(), Some(pid));

    default_terminator().terminate(&mut process).await;
    assert_eq!(process.process_group(), None);
}
