// tests/pipeline_args.rs

use std::error::Error;

use siteflow::config::SiteConfig;
use siteflow::pipeline::{build_registry, watch_rules, PREVIEW_ARGS};
use siteflow::registry::{Action, BuildMode, SessionKind, TaskRegistry};

type TestResult = Result<(), Box<dyn Error>>;

fn exec_args(reg: &TaskRegistry, name: &str) -> (Vec<String>, BuildMode) {
    match &reg.get(name).expect("task registered").action {
        Action::Exec { args, mode, .. } => (args.clone(), *mode),
        other => panic!("task '{name}' is not an exec action: {other:?}"),
    }
}

#[test]
fn preview_args_are_a_superset_of_plain_args() -> TestResult {
    let reg = build_registry(&SiteConfig::default())?;

    let (hugo, _) = exec_args(&reg, "hugo");
    let (preview, _) = exec_args(&reg, "hugo-preview");

    for arg in &hugo {
        assert!(preview.contains(arg), "preview missing base arg {arg}");
    }
    for flag in PREVIEW_ARGS {
        assert!(preview.contains(&flag.to_string()), "missing {flag}");
        assert!(!hugo.contains(&flag.to_string()), "plain run has {flag}");
    }
    Ok(())
}

#[test]
fn build_tasks_run_the_generator_in_production_mode() -> TestResult {
    let reg = build_registry(&SiteConfig::default())?;

    assert_eq!(exec_args(&reg, "hugo").1, BuildMode::Development);
    assert_eq!(exec_args(&reg, "build").1, BuildMode::Production);
    assert_eq!(exec_args(&reg, "build-preview").1, BuildMode::Production);
    Ok(())
}

#[test]
fn generator_args_follow_the_configured_layout() -> TestResult {
    let reg = build_registry(&SiteConfig::default())?;

    let (args, _) = exec_args(&reg, "hugo");
    assert_eq!(args, vec!["-d", "../dist", "-s", "site", "-v"]);
    Ok(())
}

#[test]
fn hugo_watch_spawns_the_generator_server() -> TestResult {
    let reg = build_registry(&SiteConfig::default())?;

    match &reg.get("hugo-watch").unwrap().action {
        Action::Spawn { args, .. } => {
            assert_eq!(args[0], "server");
            assert!(args.contains(&"-w".to_string()));
            assert!(args.contains(&"-p".to_string()));
            assert!(args.contains(&"3000".to_string()));
        }
        other => panic!("unexpected action: {other:?}"),
    }
    Ok(())
}

#[test]
fn fonts_is_an_in_process_flatten() -> TestResult {
    let reg = build_registry(&SiteConfig::default())?;

    match &reg.get("fonts").unwrap().action {
        Action::CopyFlatten { source, dest } => {
            assert_eq!(source.to_string_lossy(), "src/fonts");
            assert_eq!(dest.to_string_lossy(), "dist/fonts");
        }
        other => panic!("unexpected action: {other:?}"),
    }
    Ok(())
}

#[test]
fn hugo_watch_mode_leaves_the_site_tree_to_the_generator() {
    let cfg = SiteConfig::default();

    let with_reload = watch_rules(&cfg, SessionKind::Reload);
    assert!(with_reload.iter().any(|r| r.task == "hugo"));
    assert_eq!(with_reload.len(), 4);

    let generator_watches = watch_rules(&cfg, SessionKind::HugoWatch);
    assert!(generator_watches.iter().all(|r| r.task != "hugo"));
    assert_eq!(generator_watches.len(), 3);
}
