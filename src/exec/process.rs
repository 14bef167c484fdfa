// src/exec/process.rs

//! Running external build tools.
//!
//! Child stdio is inherited: build tools are verbose and often
//! interactive-feeling, so their output goes straight to the controlling
//! terminal with no capture. A nonzero exit code is a [`ProcessResult`]
//! value, not an error; whether it halts anything is the orchestrator's
//! decision.

use std::future::Future;
use std::path::PathBuf;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{Result, SiteflowError};
use crate::exec::assets;
use crate::registry::{Action, BuildMode, Task};

/// Derived status of one external invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Failure,
}

/// Outcome of one task execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessResult {
    pub exit_code: i32,
    pub status: RunStatus,
}

impl ProcessResult {
    pub fn success() -> Self {
        Self {
            exit_code: 0,
            status: RunStatus::Success,
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self {
            exit_code,
            status: RunStatus::Failure,
        }
    }

    pub fn from_exit_code(code: i32) -> Self {
        if code == 0 {
            Self::success()
        } else {
            Self::failure(code)
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }
}

/// Seam between the orchestrator and actual process spawning.
///
/// Production code uses [`CommandExecutor`]; tests substitute an
/// implementation that records scheduled tasks and returns scripted
/// outcomes without touching the OS.
pub trait Executor: Clone + Send + Sync + 'static {
    fn execute(&self, task: &Task) -> impl Future<Output = Result<ProcessResult>> + Send;
}

/// Production executor: spawns real processes from the project root.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    root: PathBuf,
}

impl CommandExecutor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn command(&self, program: &str, args: &[String], mode: BuildMode) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(&self.root)
            .env("HUGO_ENVIRONMENT", mode.env_value())
            .env("NODE_ENV", mode.env_value());
        cmd
    }

    async fn run_to_completion(
        &self,
        task: &str,
        program: &str,
        args: &[String],
        mode: BuildMode,
    ) -> Result<ProcessResult> {
        info!(task = %task, program = %program, ?mode, "starting task process");

        let status = self.command(program, args, mode).status().await?;
        let code = status.code().unwrap_or(-1);

        info!(
            task = %task,
            exit_code = code,
            success = status.success(),
            "task process exited"
        );

        Ok(ProcessResult::from_exit_code(code))
    }

    /// Spawn a long-lived process and let it run past the task itself. The
    /// child is reaped in the background so it never turns into a zombie.
    fn spawn_detached(
        &self,
        task: &str,
        program: &str,
        args: &[String],
        mode: BuildMode,
    ) -> Result<ProcessResult> {
        info!(task = %task, program = %program, "spawning long-lived process");

        let mut child = self.command(program, args, mode).spawn()?;
        let task_name = task.to_string();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => {
                    debug!(task = %task_name, ?status, "long-lived process exited")
                }
                Err(err) => {
                    warn!(task = %task_name, error = %err, "waiting on long-lived process")
                }
            }
        });

        Ok(ProcessResult::success())
    }
}

impl Executor for CommandExecutor {
    async fn execute(&self, task: &Task) -> Result<ProcessResult> {
        match &task.action {
            Action::Exec {
                program,
                args,
                mode,
            } => self.run_to_completion(&task.name, program, args, *mode).await,
            Action::Spawn {
                program,
                args,
                mode,
            } => self.spawn_detached(&task.name, program, args, *mode),
            Action::CopyFlatten { source, dest } => {
                let copied =
                    assets::flatten_copy(&self.root.join(source), &self.root.join(dest))?;
                info!(task = %task.name, copied, "flattened assets");
                Ok(ProcessResult::success())
            }
            Action::Session(_) => {
                // Session tasks are handled by the top-level driver and
                // never reach the executor.
                Err(SiteflowError::Other(anyhow::anyhow!(
                    "task '{}' is a session task and cannot be executed directly",
                    task.name
                )))
            }
        }
    }
}
