//! Interactive workflow driven by scripted answers.

mod common;

use std::num::NonZeroU32;

use common::{simulation_jar, Call, FakeDirectory, FakeScanner, ScriptedPrompt};
use enterprise_transport::ApiError;
use enterprise_types::{HostByPool, SimulationStartResult, Uuid};
use gatling_enterprise::{
    Choice, Chooser, InteractivePlugin, PluginClient, PluginError, ResolutionConfig,
};
use tempfile::TempDir;

type Plugin = InteractivePlugin<FakeDirectory, FakeScanner, ScriptedPrompt>;

fn interactive(directory: FakeDirectory, scanner: FakeScanner, answers: &[&str]) -> Plugin {
    InteractivePlugin::new(
        PluginClient::new(directory, scanner),
        Chooser::new(ScriptedPrompt::new(answers)),
    )
}

fn config(dir: &TempDir) -> ResolutionConfig {
    let file = simulation_jar(dir.path(), "myapp.jar", "Manifest-Version: 1.0\n", &["com.foo.Sim"]);
    let mut config = ResolutionConfig::new(file);
    config.artifact_id = Some("myapp".to_string());
    config
}

fn output(plugin: &Plugin) -> &str {
    &plugin.chooser().io().output
}

fn started(choice: Choice<SimulationStartResult>) -> SimulationStartResult {
    match choice {
        Choice::Selected(result) => result,
        Choice::Cancelled => panic!("workflow was cancelled"),
    }
}

#[test]
fn test_create_when_no_simulation_exists() {
    let tmp = TempDir::new().unwrap();
    let fake = FakeDirectory::new();
    let team = fake.add_team("Team");
    fake.add_pool("Tokyo");
    let paris = fake.add_pool("Paris");
    // package name (default), pool, size, simulation name (default)
    let mut plugin = interactive(
        fake,
        FakeScanner::with_classes(&["com.foo.Sim"]),
        &["", "1", "3", ""],
    );

    let result = started(plugin.create_or_start(&config(&tmp)).unwrap());
    assert!(result.created_simulation);
    assert_eq!(result.simulation.name, "Sim");
    assert_eq!(result.simulation.team_id, team.id);

    let out = output(&plugin);
    assert!(!out.contains("Choose what to do"));
    assert!(out.contains("Package name [default: myapp]"));
    assert!(out.contains("[1] Pool Paris\n[2] Pool Tokyo"));

    let fake = plugin.client().directory();
    assert_eq!(fake.created_packages(), vec!["myapp".to_string()]);
    let payload = &fake.created_simulations()[0];
    assert_eq!(
        payload.hosts_by_pool[&paris.id],
        HostByPool::new(NonZeroU32::new(3).unwrap(), 0)
    );
    assert_eq!(fake.uploads(), vec![payload.pkg_id]);
    assert_eq!(plugin.chooser().io().remaining(), 0);
}

#[test]
fn test_quit_before_anything_is_created() {
    let tmp = TempDir::new().unwrap();
    let fake = FakeDirectory::new();
    fake.add_team("Team");
    fake.add_pool("Tokyo");
    fake.add_pool("Paris");
    // package name, then quit at the pool menu
    let mut plugin = interactive(fake, FakeScanner::with_classes(&["com.foo.Sim"]), &["", "0"]);

    assert_eq!(
        plugin.create_or_start(&config(&tmp)).unwrap(),
        Choice::Cancelled
    );
    let fake = plugin.client().directory();
    assert!(fake.created_packages().is_empty());
    assert!(fake.uploads().is_empty());
    assert!(fake.created_simulations().is_empty());
}

#[test]
fn test_end_of_input_cancels() {
    let tmp = TempDir::new().unwrap();
    let fake = FakeDirectory::new();
    let team = fake.add_team("Team");
    let pkg = fake.add_package("legacy", Some(team.id), None);
    fake.add_simulation("Existing", "com.foo.Sim", &pkg, &team);
    let mut plugin = interactive(fake, FakeScanner::with_classes(&["com.foo.Sim"]), &[]);

    assert!(plugin.create_or_start(&config(&tmp)).unwrap().is_cancelled());
    assert!(output(&plugin).contains("[0] Quit\n[1] Create a new simulation\n[2] Start an existing simulation"));
    assert_eq!(
        plugin
            .client()
            .directory()
            .count(|c| matches!(c, Call::Start { .. })),
        0
    );
}

#[test]
fn test_start_existing_simulation() {
    let tmp = TempDir::new().unwrap();
    let fake = FakeDirectory::new();
    let team = fake.add_team("Team");
    let pkg_beta = fake.add_package("beta", Some(team.id), None);
    let pkg_alpha = fake.add_package("alpha", Some(team.id), None);
    fake.add_simulation("Beta", "pkg.A", &pkg_beta, &team);
    let alpha = fake.add_simulation("Alpha", "pkg.A", &pkg_alpha, &team);
    // start existing, then the first simulation by name
    let mut plugin = interactive(fake, FakeScanner::with_classes(&["pkg.A", "pkg.B"]), &["2", "1"]);

    let result = started(plugin.create_or_start(&config(&tmp)).unwrap());
    assert!(!result.created_simulation);
    assert_eq!(result.simulation.id, alpha.id);
    assert_eq!(result.simulation.class_name, "pkg.A");

    assert!(output(&plugin).contains("[1] Simulation 'Alpha'"));
    let fake = plugin.client().directory();
    assert_eq!(fake.uploads(), vec![pkg_alpha.id]);
    assert_eq!(fake.count(|c| matches!(c, Call::UpdateClassName { .. })), 0);
    assert!(fake.created_simulations().is_empty());
}

#[test]
fn test_start_existing_picks_only_simulation() {
    let tmp = TempDir::new().unwrap();
    let fake = FakeDirectory::new();
    let team = fake.add_team("Team");
    let pkg = fake.add_package("alpha", Some(team.id), None);
    let alpha = fake.add_simulation("Alpha", "com.foo.Sim", &pkg, &team);
    // start existing; no simulation menu follows
    let mut plugin = interactive(fake, FakeScanner::with_classes(&["com.foo.Sim"]), &["2"]);

    let outcome = plugin.create_or_start(&config(&tmp)).unwrap();
    assert!(!outcome.is_cancelled());
    let result = started(outcome);
    assert_eq!(result.simulation.id, alpha.id);
    assert!(!result.created_simulation);
    assert!(!output(&plugin).contains("Choose a simulation to start"));
    assert_eq!(plugin.chooser().io().remaining(), 0);
}

#[test]
fn test_start_existing_asks_for_class_when_stored_one_is_gone() {
    let tmp = TempDir::new().unwrap();
    let fake = FakeDirectory::new();
    let team = fake.add_team("Team");
    let pkg = fake.add_package("pkg", Some(team.id), None);
    let sim = fake.add_simulation("Sim", "pkg.Removed", &pkg, &team);
    let mut plugin = interactive(fake, FakeScanner::with_classes(&["pkg.B", "pkg.A"]), &["2"]);

    let mut config = config(&tmp);
    config.simulation_id = Some(sim.id);
    let result = started(plugin.create_or_start(&config).unwrap());

    assert_eq!(result.simulation.class_name, "pkg.B");
    assert!(!output(&plugin).contains("Choose what to do"));
    assert!(plugin.client().directory().calls().contains(&Call::UpdateClassName {
        simulation_id: sim.id,
        class_name: "pkg.B".to_string(),
    }));
}

#[test]
fn test_use_existing_package() {
    let tmp = TempDir::new().unwrap();
    let fake = FakeDirectory::new();
    let team = fake.add_team("Team");
    fake.add_pool("Paris");
    fake.add_package("zeta", Some(team.id), None);
    let alpha = fake.add_package("alpha", None, None);
    fake.add_package("other-team", Some(Uuid::new_v4()), None);
    // use existing, first package by name, size, simulation name
    let mut plugin = interactive(
        fake,
        FakeScanner::with_classes(&["com.foo.Sim"]),
        &["2", "1", "1", ""],
    );

    let result = started(plugin.create_or_start(&config(&tmp)).unwrap());
    assert_eq!(result.simulation.pkg_id, alpha.id);

    let out = output(&plugin);
    assert!(out.contains("[1] Package 'alpha'"));
    assert!(out.contains("[2] Package 'zeta'"));
    assert!(!out.contains("other-team"));
    assert!(plugin.client().directory().created_packages().is_empty());
}

#[test]
fn test_taken_names_are_rejected() {
    let tmp = TempDir::new().unwrap();
    let fake = FakeDirectory::new();
    let team = fake.add_team("Team");
    fake.add_pool("Paris");
    let legacy = fake.add_package("myapp", Some(team.id), None);
    fake.add_simulation("Sim", "com.foo.Sim", &legacy, &team);
    // create simulation, create package, two package names, size, two simulation names
    let mut plugin = interactive(
        fake,
        FakeScanner::with_classes(&["com.foo.Sim"]),
        &["1", "1", "myapp", "myapp-v2", "2", "Sim", "Sim v2"],
    );

    let result = started(plugin.create_or_start(&config(&tmp)).unwrap());
    assert_eq!(result.simulation.name, "Sim v2");

    let out = output(&plugin);
    // Defaults that collide are not offered.
    assert!(out.contains("Package name:\n"));
    assert!(out.contains("Simulation name:\n"));
    assert!(out.contains("A package named 'myapp' already exists"));
    assert!(out.contains("A simulation named 'Sim' already exists"));
    assert_eq!(
        plugin.client().directory().created_packages(),
        vec!["myapp-v2".to_string()]
    );
}

#[test]
fn test_ambiguous_class_and_team_are_asked() {
    let tmp = TempDir::new().unwrap();
    let fake = FakeDirectory::new();
    fake.add_team("Zulu");
    let alpha = fake.add_team("Alpha");
    fake.add_pool("Paris");
    // class, team, package name, size, simulation name
    let mut plugin = interactive(
        fake,
        FakeScanner::with_classes(&["a.Second", "a.First"]),
        &["2", "1", "", "1", ""],
    );

    let result = started(plugin.create_or_start(&config(&tmp)).unwrap());
    assert_eq!(result.simulation.class_name, "a.Second");
    assert_eq!(result.simulation.team_id, alpha.id);
    assert_eq!(result.simulation.name, "Second");

    let out = output(&plugin);
    assert!(out.contains("[1] a.First\n[2] a.Second"));
    assert!(out.contains("[1] Team 'Alpha'"));
}

#[test]
fn test_configuration_short_circuits_prompts() {
    let tmp = TempDir::new().unwrap();
    let fake = FakeDirectory::new();
    fake.add_team("A");
    let b = fake.add_team("B");
    fake.add_pool("Paris");
    let pkg = fake.add_package("configured", Some(b.id), None);
    // size, simulation name
    let mut plugin = interactive(
        fake,
        FakeScanner::with_classes(&["a.First", "a.Second"]),
        &["1", ""],
    );

    let mut config = config(&tmp);
    config.team_id = Some(b.id);
    config.package_id = Some(pkg.id);
    config.simulation_class = Some("a.First".to_string());
    let result = started(plugin.create_or_start(&config).unwrap());

    assert_eq!(result.simulation.team_id, b.id);
    assert_eq!(result.simulation.pkg_id, pkg.id);
    let out = output(&plugin);
    assert!(!out.contains("Choose a team"));
    assert!(!out.contains("Choose a simulation class"));
    assert!(!out.contains("Choose how to provide the package"));
}

#[test]
fn test_invalid_configured_team_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let fake = FakeDirectory::new();
    fake.add_team("A");
    fake.add_team("B");
    let mut plugin = interactive(fake, FakeScanner::with_classes(&["com.foo.Sim"]), &["1"]);

    let mut config = config(&tmp);
    let unknown = Uuid::new_v4();
    config.team_id = Some(unknown);
    assert!(matches!(
        plugin.create_or_start(&config),
        Err(PluginError::TeamNotFound(id)) if id == unknown
    ));
    assert!(!output(&plugin).contains("Choose a team"));
}

#[test]
fn test_start_failure_after_interactive_creation() {
    let tmp = TempDir::new().unwrap();
    let fake = FakeDirectory::new();
    fake.add_team("Team");
    fake.add_pool("Paris");
    fake.fail_start(ApiError::Unauthorized);
    let mut plugin = interactive(fake, FakeScanner::with_classes(&["com.foo.Sim"]), &["", "1", ""]);

    match plugin.create_or_start(&config(&tmp)).unwrap_err() {
        PluginError::SimulationStart {
            simulation,
            created,
            source,
        } => {
            assert!(created);
            assert_eq!(simulation.name, "Sim");
            assert!(source.is_auth());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_bytecode_check_happens_before_any_prompt() {
    let tmp = TempDir::new().unwrap();
    let fake = FakeDirectory::new();
    fake.set_max_java_version(Some("11"));
    fake.add_team("Team");
    let mut plugin = interactive(fake, FakeScanner::compiled_for(&["com.foo.Sim"], 21), &["1"]);

    assert!(matches!(
        plugin.create_or_start(&config(&tmp)),
        Err(PluginError::UnsupportedJavaVersion { version: 21, max: 11, .. })
    ));
    assert!(output(&plugin).is_empty());
}
