// src/engine/mod.rs

//! Orchestration engine.
//!
//! - [`runner`] executes one plan sequentially with fail-fast semantics and
//!   dispatches the reload / error notification afterwards.
//! - [`gate`] coalesces rapid watch triggers so a task has at most one run
//!   in flight and at most one follow-up pending.
//! - [`session`] is the long-lived watch loop that ties the watcher, the
//!   gate, and the runner together.

pub mod gate;
pub mod runner;
pub mod session;

pub use gate::TriggerGate;
pub use runner::{run_plan, run_task, Notifier, NoopNotifier, RunOutcome};
pub use session::{run_session, SessionEvent};
