//! Dependency commands: add, remove and sync

use std::sync::Arc;

use colored::Colorize;
use mngproj_exec::{Launcher, Sinks};
use tokio::runtime::Runtime;

use crate::commands::runtime;
use crate::context::Context;
use crate::error::Result;

const INSTALL_SCRIPT: &str = "install";
const REMOVE_SCRIPT: &str = "remove_pkg";

/// Regenerate the dependency manifest, then run the `install` script.
///
/// A component without an `install` script only gets its manifest written.
fn sync_component(rt: &Runtime, launcher: &Launcher, component: &str) -> Result<()> {
    let project = launcher.project();
    if let Some(path) = project.write_dependency_manifest(component)? {
        tracing::debug!(component, path = %path.display(), "dependency manifest written");
    }

    if project.resolve(component)?.script(INSTALL_SCRIPT).is_none() {
        println!(
            "{} no {} script for {:?}, skipping",
            "note:".dimmed(),
            INSTALL_SCRIPT,
            component
        );
        return Ok(());
    }
    rt.block_on(launcher.run(component, INSTALL_SCRIPT, &[], Sinks::inherit()))?;
    Ok(())
}

/// Run the add command
pub fn run_add(ctx: &Context, component: &str, packages: &[String]) -> Result<()> {
    let mut project = ctx.project()?;
    for package in packages {
        println!(
            "Adding dependency {:?} to component {:?}...",
            package, component
        );
        project.add_dependency(component, package)?;
    }

    println!("Syncing dependencies...");
    let launcher = Launcher::new(Arc::new(project));
    sync_component(&runtime()?, &launcher, component)?;
    println!("{} Done.", "OK".green().bold());
    Ok(())
}

/// Run the remove command
pub fn run_remove(ctx: &Context, component: &str, packages: &[String]) -> Result<()> {
    let mut project = ctx.project()?;
    for package in packages {
        if !project.remove_dependency(component, package)? {
            println!(
                "{} {:?} is not a dependency of {:?}",
                "note:".dimmed(),
                package,
                component
            );
        }
    }

    let launcher = Launcher::new(Arc::new(project));
    if launcher
        .project()
        .resolve(component)?
        .script(REMOVE_SCRIPT)
        .is_some()
    {
        runtime()?.block_on(launcher.run(component, REMOVE_SCRIPT, packages, Sinks::inherit()))?;
    }
    println!("{} Removed.", "OK".green().bold());
    Ok(())
}

/// Run the sync command for `components`, or every component when empty
pub fn run_sync(ctx: &Context, components: &[String]) -> Result<()> {
    let project = ctx.project()?;
    project.validate_tools()?;

    let targets = if components.is_empty() {
        project.component_names()
    } else {
        components.to_vec()
    };

    let launcher = Launcher::new(Arc::new(project));
    let rt = runtime()?;
    for component in &targets {
        println!("Syncing component {:?}...", component);
        sync_component(&rt, &launcher, component)?;
    }
    println!("{} All synced.", "OK".green().bold());
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::CliError;
    use mngproj_test_utils::TestProject;
    use pretty_assertions::assert_eq;

    fn fixture() -> TestProject {
        let mut fixture = TestProject::new();
        fixture
            .preset(
                "pip",
                r#"
[metadata]
type = "pip"
role = "package_manager"
manifest_file = "requirements.txt"

[scripts]
install = "touch requirements.txt && cp requirements.txt installed.txt"
remove_pkg = "echo {{range .Args}}{{.}} {{end}}> removed.txt"
"#,
            )
            .manifest(
                "[[components]]\nname = \"api\"\ntype = \"pip\"\npath = \"api\"\n\n[[components]]\nname = \"plain\"\n",
            )
            .dir("api");
        fixture
    }

    fn context(fixture: &TestProject) -> Context {
        Context::new(fixture.root(), Some(fixture.presets_dir()))
    }

    #[test]
    fn test_add_writes_manifest_and_installs() {
        let fixture = fixture();
        run_add(&context(&fixture), "api", &["requests".into(), "flask".into()]).unwrap();

        assert_eq!(fixture.read("api/requirements.txt"), "requests\nflask\n");
        assert_eq!(fixture.read("api/installed.txt"), "requests\nflask\n");
        fixture.assert_file_contains("mngproj.toml", "requests");
    }

    #[test]
    fn test_remove_updates_list_and_runs_script() {
        let fixture = fixture();
        let ctx = context(&fixture);
        run_add(&ctx, "api", &["requests".into(), "flask".into()]).unwrap();
        run_remove(&ctx, "api", &["flask".into()]).unwrap();

        assert_eq!(fixture.read("api/requirements.txt"), "requests\n");
        fixture.assert_file_contains("api/removed.txt", "flask");
    }

    #[test]
    fn test_sync_installs_and_skips_components_without_install() {
        let fixture = fixture();
        run_sync(&context(&fixture), &[]).unwrap();
        assert_eq!(fixture.read("api/installed.txt"), "");
        fixture.assert_file_not_exists("installed.txt");
    }

    #[test]
    fn test_sync_unknown_component_fails() {
        let fixture = fixture();
        let result = run_sync(&context(&fixture), &["ghost".into()]);
        assert!(matches!(
            result,
            Err(CliError::Core(mngproj_core::Error::ComponentNotFound { .. }))
        ));
    }

    #[test]
    fn test_sync_reports_missing_tools() {
        let mut fixture = fixture();
        fixture.preset(
            "exotic",
            "[metadata]\ntype = \"exotic\"\nrequired_tools = [\"definitely_not_installed_tool\"]\n",
        );
        fixture.manifest("[[components]]\nname = \"x\"\ntype = \"exotic\"\n");
        let result = run_sync(&context(&fixture), &[]);
        assert!(matches!(
            result,
            Err(CliError::Core(mngproj_core::Error::MissingTools { .. }))
        ));
    }
}
