// tests/registry_errors.rs

mod common;

use std::error::Error;

use common::exec_action;
use siteflow::errors::SiteflowError;
use siteflow::registry::{Action, TaskRegistry};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn duplicate_registration_fails_and_keeps_first() -> TestResult {
    let mut reg = TaskRegistry::new();
    reg.register("css", &[], exec_action("postcss"))?;

    let err = reg
        .register("css", &["js"], exec_action("other"))
        .unwrap_err();
    assert!(matches!(err, SiteflowError::DuplicateTask(name) if name == "css"));

    // First registration retained unchanged.
    let task = reg.get("css").expect("css still registered");
    assert!(task.prerequisites.is_empty());
    match &task.action {
        Action::Exec { program, .. } => assert_eq!(program, "postcss"),
        other => panic!("unexpected action: {other:?}"),
    }
    Ok(())
}

#[test]
fn planning_unknown_task_fails() {
    let reg = TaskRegistry::new();
    let err = reg.plan("ghost").unwrap_err();
    assert!(matches!(err, SiteflowError::UnknownTask(name) if name == "ghost"));
}

#[test]
fn planning_with_unknown_transitive_prerequisite_fails() -> TestResult {
    let mut reg = TaskRegistry::new();
    reg.register("b", &["missing"], exec_action("b"))?;
    reg.register("c", &["b"], exec_action("c"))?;

    let err = reg.plan("c").unwrap_err();
    assert!(matches!(err, SiteflowError::UnknownTask(name) if name == "missing"));
    Ok(())
}

#[test]
fn cycle_is_detected_during_planning() -> TestResult {
    let mut reg = TaskRegistry::new();
    reg.register("a", &["b"], exec_action("a"))?;
    reg.register("b", &["a"], exec_action("b"))?;

    let err = reg.plan("a").unwrap_err();
    assert!(matches!(err, SiteflowError::CyclicDependency(_)));
    Ok(())
}

#[test]
fn validate_rejects_cycles_and_dangling_references() -> TestResult {
    let mut reg = TaskRegistry::new();
    reg.register("a", &["b"], exec_action("a"))?;
    reg.register("b", &["a"], exec_action("b"))?;
    assert!(matches!(
        reg.validate().unwrap_err(),
        SiteflowError::CyclicDependency(_)
    ));

    let mut reg = TaskRegistry::new();
    reg.register("a", &["nowhere"], exec_action("a"))?;
    assert!(matches!(
        reg.validate().unwrap_err(),
        SiteflowError::UnknownTask(name) if name == "nowhere"
    ));
    Ok(())
}
