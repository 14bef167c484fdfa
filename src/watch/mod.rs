// src/watch/mod.rs

//! File watching and change-to-task mapping.
//!
//! - [`patterns`] compiles per-task watch globs.
//! - [`watcher`] wires a cross-platform filesystem watcher (`notify`) to
//!   the session event channel.
//!
//! This module knows nothing about the task graph; it only turns filesystem
//! changes into task-level triggers.

pub mod patterns;
pub mod watcher;

pub use patterns::{compile_rules, CompiledRule, WatchRule};
pub use watcher::{spawn_watcher, WatcherHandle};
