// tests/coalescing.rs

use siteflow::engine::TriggerGate;

#[test]
fn rapid_triggers_collapse_into_one_followup_run() {
    let mut gate = TriggerGate::new();

    // Three rapid changes to the same rule: the first starts a run, the
    // other two coalesce.
    assert!(gate.on_trigger("css"));
    assert!(!gate.on_trigger("css"));
    assert!(!gate.on_trigger("css"));

    // When the in-flight run finishes, exactly one follow-up starts.
    assert!(gate.on_finished("css"));

    // The follow-up finishing with no new triggers starts nothing.
    assert!(!gate.on_finished("css"));
    assert!(gate.is_idle());
}

#[test]
fn trigger_during_followup_schedules_another_run() {
    let mut gate = TriggerGate::new();

    assert!(gate.on_trigger("js"));
    assert!(!gate.on_trigger("js"));
    assert!(gate.on_finished("js")); // follow-up begins

    // A change during the follow-up coalesces again.
    assert!(!gate.on_trigger("js"));
    assert!(gate.on_finished("js"));
    assert!(!gate.on_finished("js"));
}

#[test]
fn different_tasks_run_independently() {
    let mut gate = TriggerGate::new();

    assert!(gate.on_trigger("css"));
    assert!(gate.on_trigger("js"));
    assert!(!gate.is_idle());

    assert!(!gate.on_finished("css"));
    assert!(!gate.on_finished("js"));
    assert!(gate.is_idle());
}

#[test]
fn trigger_after_idle_starts_immediately() {
    let mut gate = TriggerGate::new();

    assert!(gate.on_trigger("fonts"));
    assert!(!gate.on_finished("fonts"));
    assert!(gate.on_trigger("fonts"));
}
