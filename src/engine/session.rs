// src/engine/session.rs

//! The long-lived watch session.
//!
//! A session consumes three kinds of events over a single channel: watcher
//! triggers, completions of spawned runs, and the Ctrl-C shutdown signal.
//! Triggered tasks run concurrently with the loop itself so the watcher
//! never stalls behind a slow build; the [`TriggerGate`] keeps runs of the
//! same task serialized. A failing run is logged and pushed to the browser
//! overlay, and the session survives it.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::engine::gate::TriggerGate;
use crate::engine::runner::{run_task, Notifier};
use crate::errors::Result;
use crate::exec::Executor;
use crate::registry::{TaskName, TaskRegistry};
use crate::watch::{self, WatchRule};

/// Events feeding the session loop.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A filesystem change matched a watch rule.
    Triggered { task: TaskName },
    /// A spawned task run finished (successfully or not).
    RunFinished { task: TaskName },
    /// Operator interrupt; leave the session.
    Shutdown,
}

/// Run a watch session until shutdown or a fatal watcher error.
///
/// The initial full build has already happened by the time this is called;
/// watcher-triggered re-runs execute just the triggered task, whose
/// prerequisites are known to be up to date.
pub async fn run_session<E: Executor, N: Notifier>(
    registry: Arc<TaskRegistry>,
    rules: Vec<WatchRule>,
    root: PathBuf,
    executor: E,
    notifier: N,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<SessionEvent>(64);

    let compiled = watch::compile_rules(&rules)?;
    let _watcher = watch::spawn_watcher(root, compiled, tx.clone())?;

    // Ctrl-C ends the session; nothing mid-task is cancelled, a running
    // tool finishes on its own.
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("siteflow: failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(SessionEvent::Shutdown).await;
        });
    }

    info!("watch session started");

    let mut gate = TriggerGate::new();

    while let Some(event) = rx.recv().await {
        match event {
            SessionEvent::Triggered { task } => {
                if gate.on_trigger(&task) {
                    start_run(&task, &registry, &executor, &notifier, &tx);
                }
            }
            SessionEvent::RunFinished { task } => {
                if gate.on_finished(&task) {
                    start_run(&task, &registry, &executor, &notifier, &tx);
                }
            }
            SessionEvent::Shutdown => {
                info!("shutdown requested, leaving watch session");
                break;
            }
        }
    }

    Ok(())
}

/// Spawn a single-task run and report back to the session loop when done.
fn start_run<E: Executor, N: Notifier>(
    task: &str,
    registry: &Arc<TaskRegistry>,
    executor: &E,
    notifier: &N,
    tx: &mpsc::Sender<SessionEvent>,
) {
    let task = task.to_string();
    let registry = Arc::clone(registry);
    let executor = executor.clone();
    let notifier = notifier.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        if let Err(err) = run_task(&registry, &task, &executor, &notifier).await {
            error!(task = %task, error = %err, "watch-triggered run failed");
        }
        let _ = tx
            .send(SessionEvent::RunFinished { task })
            .await;
    });
}
