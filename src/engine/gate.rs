// src/engine/gate.rs

//! Per-task trigger coalescing.
//!
//! Multiple rapid file changes for the same task must not fan out into
//! concurrent runs. The gate keeps at most one run of a task in flight;
//! triggers arriving while it runs collapse into a single pending follow-up
//! (last-writer-wins, not a queue of every event). Different tasks are
//! independent of each other.

use std::collections::HashSet;

use tracing::debug;

use crate::registry::TaskName;

#[derive(Debug, Default)]
pub struct TriggerGate {
    running: HashSet<TaskName>,
    pending: HashSet<TaskName>,
}

impl TriggerGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a trigger for `task`. Returns `true` if the caller should
    /// start a run now; `false` means a run is already in flight and the
    /// trigger was coalesced into its follow-up.
    pub fn on_trigger(&mut self, task: &str) -> bool {
        if self.running.contains(task) {
            let newly = self.pending.insert(task.to_string());
            debug!(task = %task, newly, "run in flight; coalescing trigger");
            return false;
        }
        self.running.insert(task.to_string());
        true
    }

    /// Record that a run of `task` finished. Returns `true` if a coalesced
    /// follow-up run should start immediately (the gate then counts that
    /// follow-up as the new in-flight run).
    pub fn on_finished(&mut self, task: &str) -> bool {
        self.running.remove(task);
        if self.pending.remove(task) {
            debug!(task = %task, "starting coalesced follow-up run");
            self.running.insert(task.to_string());
            return true;
        }
        false
    }

    /// True if no runs are in flight.
    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }
}
