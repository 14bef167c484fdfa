// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod pipeline;
pub mod registry;
pub mod server;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::cli::CliArgs;
use crate::engine::{run_session, run_task, NoopNotifier};
use crate::errors::{Result, SiteflowError};
use crate::exec::CommandExecutor;
use crate::registry::{Action, SessionKind, TaskRegistry};
use crate::server::ReloadHub;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the task registry for the site pipeline
/// - one-shot execution, or a watch session with the dev server
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let mut cfg = config::load_config(&config_path)?;
    if let Some(port) = args.port {
        cfg.server.port = port;
    }

    let registry = pipeline::build_registry(&cfg)?;

    if args.dry_run {
        print_dry_run(&registry, &args.task)?;
        return Ok(());
    }

    let session_kind = match registry.get(&args.task) {
        None => return Err(SiteflowError::UnknownTask(args.task.clone())),
        Some(task) => match &task.action {
            Action::Session(kind) => Some(*kind),
            _ => None,
        },
    };

    let root = config::project_root(&config_path);
    let executor = CommandExecutor::new(root.clone());

    match session_kind {
        // One-shot invocation: build, report, exit.
        None => run_task(&registry, &args.task, &executor, &NoopNotifier).await,

        Some(SessionKind::Reload) => {
            // Bind before building so a busy port fails fast.
            let listener = server::bind(cfg.server.port).await?;
            let hub = ReloadHub::new();

            run_task(&registry, &args.task, &executor, &hub).await?;

            let serve_root = root.join(&cfg.server.root);
            tokio::spawn(server::serve(listener, serve_root, hub.clone()));

            let rules = pipeline::watch_rules(&cfg, SessionKind::Reload);
            run_session(Arc::new(registry), rules, root, executor, hub).await
        }

        Some(SessionKind::HugoWatch) => {
            // The generator serves and watches the site itself; only assets
            // are watched here and nothing pushes reloads.
            run_task(&registry, &args.task, &executor, &NoopNotifier).await?;

            info!("generator watch server running; watching assets");
            let rules = pipeline::watch_rules(&cfg, SessionKind::HugoWatch);
            run_session(Arc::new(registry), rules, root, executor, NoopNotifier).await
        }
    }
}

/// Print the resolved plan for a task without executing anything.
fn print_dry_run(registry: &TaskRegistry, task: &str) -> Result<()> {
    let plan = registry.plan(task)?;

    println!("siteflow dry-run: {task}");
    println!("plan ({} tasks):", plan.len());

    for name in plan.tasks() {
        let task = registry
            .get(name)
            .ok_or_else(|| SiteflowError::UnknownTask(name.clone()))?;

        match &task.action {
            Action::Exec {
                program,
                args,
                mode,
            } => println!("  - {name}: {program} {} [{mode:?}]", args.join(" ")),
            Action::Spawn { program, args, .. } => {
                println!("  - {name}: {program} {} (long-lived)", args.join(" "))
            }
            Action::CopyFlatten { source, dest } => {
                println!("  - {name}: flatten {source:?} -> {dest:?}")
            }
            Action::Session(kind) => println!("  - {name}: watch session ({kind:?})"),
        }
    }

    Ok(())
}
