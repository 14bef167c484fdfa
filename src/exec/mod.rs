// src/exec/mod.rs

//! Process execution layer.
//!
//! [`process`] defines the [`Executor`] seam and the production
//! implementation on `tokio::process::Command`; [`assets`] holds the one
//! in-process transform (font flattening).

pub mod assets;
pub mod process;

pub use process::{CommandExecutor, Executor, ProcessResult, RunStatus};
