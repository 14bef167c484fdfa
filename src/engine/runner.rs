// src/engine/runner.rs

//! Sequential plan execution.
//!
//! One run moves through plan → execute → terminal state: each task in the
//! plan executes in order, the first failure skips everything after it
//! (fail-fast, no partial continuation), and exactly one of `notify_reload`
//! (success) or `notify_error` (failure) fires at the end.

use tracing::{debug, info, warn};

use crate::errors::{Result, SiteflowError};
use crate::exec::Executor;
use crate::registry::{Action, ExecutionPlan, TaskName, TaskRegistry};

/// Terminal state of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded,
    Failed { task: TaskName, exit_code: i32 },
}

/// Sink for reload / error signals at the end of a run.
///
/// The dev server's reload hub implements this; one-shot CLI invocations
/// and `server-hugo` sessions use [`NoopNotifier`].
pub trait Notifier: Clone + Send + Sync + 'static {
    fn notify_reload(&self);
    fn notify_error(&self, message: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify_reload(&self) {}
    fn notify_error(&self, _message: &str) {}
}

/// Execute every task in `plan` in order through `executor`.
///
/// Session tasks in the plan (the requested `server`/`server-hugo` entry
/// itself) are skipped; the driver enters the session separately once the
/// prerequisites have been built.
pub async fn run_plan<E: Executor>(
    registry: &TaskRegistry,
    plan: &ExecutionPlan,
    executor: &E,
) -> Result<RunOutcome> {
    for name in plan.tasks() {
        let task = registry
            .get(name)
            .ok_or_else(|| SiteflowError::UnknownTask(name.clone()))?;

        if matches!(task.action, Action::Session(_)) {
            debug!(task = %name, "session task reached; plan execution done");
            continue;
        }

        let result = executor.execute(task).await?;
        if !result.is_success() {
            warn!(
                task = %name,
                exit_code = result.exit_code,
                "task failed; skipping remaining plan entries"
            );
            return Ok(RunOutcome::Failed {
                task: name.clone(),
                exit_code: result.exit_code,
            });
        }
    }

    Ok(RunOutcome::Succeeded)
}

/// Plan and run `name`, then dispatch the end-of-run notification.
///
/// On failure this returns `ProcessFailure` so one-shot invocations can
/// propagate the tool's exit code; watch sessions catch the error and keep
/// going.
pub async fn run_task<E: Executor, N: Notifier>(
    registry: &TaskRegistry,
    name: &str,
    executor: &E,
    notifier: &N,
) -> Result<()> {
    let plan = registry.plan(name)?;
    info!(task = %name, plan = ?plan.tasks(), "executing plan");

    match run_plan(registry, &plan, executor).await {
        Ok(RunOutcome::Succeeded) => {
            notifier.notify_reload();
            Ok(())
        }
        Ok(RunOutcome::Failed { task, exit_code }) => {
            let err = SiteflowError::ProcessFailure {
                task,
                exit_code,
            };
            notifier.notify_error(&err.to_string());
            Err(err)
        }
        Err(err) => {
            notifier.notify_error(&err.to_string());
            Err(err)
        }
    }
}
