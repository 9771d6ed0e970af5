//! Resolution properties across arbitrary preset stacks

use mngproj_core::{Project, resolve_component};
use mngproj_meta::{ComponentConfig, PresetDefinition, PresetMap, PresetSource, RolePriorities};
use mngproj_test_utils::TestProject;
use proptest::prelude::*;
use std::path::Path;
use std::sync::Arc;

const ROLES: [&str; 5] = ["framework", "tool", "package_manager", "language", "custom"];

#[derive(Debug, Clone)]
struct Layer {
    role: &'static str,
    has_manifest: bool,
    has_script: bool,
}

fn layer() -> impl Strategy<Value = Layer> {
    (prop::sample::select(ROLES.to_vec()), any::<bool>(), any::<bool>()).prop_map(
        |(role, has_manifest, has_script)| Layer {
            role,
            has_manifest,
            has_script,
        },
    )
}

fn build(layers: &[Layer]) -> (ComponentConfig, PresetMap) {
    let mut presets = PresetMap::new();
    let mut component = ComponentConfig::new("app");
    for (i, layer) in layers.iter().enumerate() {
        let name = format!("t{i}");
        let mut def = PresetDefinition::default();
        def.metadata.role = layer.role.to_string();
        if layer.has_manifest {
            def.metadata.manifest_file = Some(format!("{name}.lock"));
        }
        if layer.has_script {
            def.scripts.insert("run".into(), format!("run-{name}"));
        }
        def.env.insert("LAST".into(), name.clone());
        presets.insert(name.clone(), def);
        component.types.push(name);
    }
    (component, presets)
}

proptest! {
    #[test]
    fn script_goes_to_last_highest_scorer(layers in prop::collection::vec(layer(), 1..6)) {
        let (component, presets) = build(&layers);
        let roles = RolePriorities::default();
        let resolved = resolve_component(&component, Path::new("/p"), &presets, &roles).unwrap();

        let best = layers
            .iter()
            .filter(|l| l.has_script)
            .map(|l| roles.score(l.role))
            .max();
        let expected = best.map(|best| {
            let idx = layers
                .iter()
                .rposition(|l| l.has_script && roles.score(l.role) == best)
                .unwrap();
            format!("run-t{idx}")
        });
        prop_assert_eq!(resolved.scripts.get("run").cloned(), expected);
    }

    #[test]
    fn manifest_goes_to_first_highest_scorer(layers in prop::collection::vec(layer(), 1..6)) {
        let (component, presets) = build(&layers);
        let roles = RolePriorities::default();
        let resolved = resolve_component(&component, Path::new("/p"), &presets, &roles).unwrap();

        let best = layers
            .iter()
            .filter(|l| l.has_manifest)
            .map(|l| roles.score(l.role))
            .max();
        let expected = best.map(|best| {
            let idx = layers
                .iter()
                .position(|l| l.has_manifest && roles.score(l.role) == best)
                .unwrap();
            format!("t{idx}.lock")
        });
        prop_assert_eq!(resolved.manifest_file, expected);
    }

    #[test]
    fn env_follows_declaration_order(layers in prop::collection::vec(layer(), 1..6)) {
        let (component, presets) = build(&layers);
        let resolved =
            resolve_component(&component, Path::new("/p"), &presets, &RolePriorities::default())
                .unwrap();
        prop_assert_eq!(resolved.env["LAST"].clone(), format!("t{}", layers.len() - 1));
    }

    #[test]
    fn inline_overrides_beat_every_preset(layers in prop::collection::vec(layer(), 1..6)) {
        let (mut component, presets) = build(&layers);
        component.scripts.insert("run".into(), "mine".into());
        component.env.insert("LAST".into(), "mine".into());
        let resolved =
            resolve_component(&component, Path::new("/p"), &presets, &RolePriorities::default())
                .unwrap();
        prop_assert_eq!(resolved.scripts["run"].as_str(), "mine");
        prop_assert_eq!(resolved.env["LAST"].as_str(), "mine");
    }

    #[test]
    fn resolution_is_idempotent(layers in prop::collection::vec(layer(), 0..6)) {
        let (component, presets) = build(&layers);
        let roles = RolePriorities::default();
        let first = resolve_component(&component, Path::new("/p"), &presets, &roles).unwrap();
        let second = resolve_component(&component, Path::new("/p"), &presets, &roles).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn project_resolution_reads_presets_from_disk() {
    let mut fixture = TestProject::new();
    fixture
        .preset(
            "languages/python",
            r#"
[metadata]
type = "python"
role = "language"

[scripts]
run = "python main.py"
test = "pytest"

[env]
PYTHONUNBUFFERED = "1"
"#,
        )
        .preset(
            "frameworks/django",
            r#"
[metadata]
type = "django"
role = "framework"

[scripts]
run = "python manage.py runserver"
"#,
        )
        .preset(
            "package_managers/pip",
            r#"
[metadata]
type = "pip"
role = "package_manager"
manifest_file = "requirements.txt"

[scripts]
install = "pip install -r requirements.txt"
"#,
        )
        .manifest(
            r#"
[project]
name = "shop"

[[components]]
name = "api"
types = ["python", "django", "pip"]
path = "services/api"

[components.env]
DJANGO_SETTINGS_MODULE = "shop.settings"
"#,
        );

    let presets: Arc<dyn PresetSource> =
        Arc::new(mngproj_meta::PresetDirectory::new(fixture.presets_dir()));
    let project = Project::load(&fixture.manifest_path(), presets).unwrap();
    let resolved = project.resolve("api").unwrap();

    assert_eq!(resolved.primary_type, "python");
    assert_eq!(resolved.abs_path, fixture.root().join("services/api"));
    assert_eq!(resolved.manifest_file.as_deref(), Some("requirements.txt"));
    assert_eq!(resolved.scripts["run"], "python manage.py runserver");
    assert_eq!(resolved.scripts["test"], "pytest");
    assert_eq!(resolved.scripts["install"], "pip install -r requirements.txt");
    assert_eq!(resolved.env["PYTHONUNBUFFERED"], "1");
    assert_eq!(resolved.env["DJANGO_SETTINGS_MODULE"], "shop.settings");

    assert_eq!(project.resolve("api").unwrap(), resolved);
}
