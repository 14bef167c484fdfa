// tests/common/mod.rs

//! Shared test doubles: an executor that records scheduled tasks and
//! returns scripted outcomes, and a notifier that counts signals.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use siteflow::engine::Notifier;
use siteflow::errors::Result;
use siteflow::exec::{Executor, ProcessResult};
use siteflow::registry::{Action, BuildMode, Task};

/// Executor that never touches the OS: records every task it is asked to
/// run and fails the ones it was told to fail.
#[derive(Clone, Default)]
pub struct TestExecutor {
    calls: Arc<Mutex<Vec<String>>>,
    fail: Arc<Mutex<HashSet<String>>>,
}

impl TestExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(self, task: &str) -> Self {
        self.fail.lock().unwrap().insert(task.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Executor for TestExecutor {
    async fn execute(&self, task: &Task) -> Result<ProcessResult> {
        self.calls.lock().unwrap().push(task.name.clone());
        if self.fail.lock().unwrap().contains(&task.name) {
            Ok(ProcessResult::failure(1))
        } else {
            Ok(ProcessResult::success())
        }
    }
}

/// Notifier that records how often each signal fired.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    reloads: Arc<Mutex<usize>>,
    errors: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reload_count(&self) -> usize {
        *self.reloads.lock().unwrap()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_reload(&self) {
        *self.reloads.lock().unwrap() += 1;
    }

    fn notify_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// A dummy exec action for registry-focused tests.
pub fn exec_action(program: &str) -> Action {
    Action::Exec {
        program: program.to_string(),
        args: vec![],
        mode: BuildMode::Development,
    }
}
