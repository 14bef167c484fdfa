// src/errors.rs

//! Crate-wide error type.
//!
//! Registry-time errors (`DuplicateTask`, `UnknownTask`, `CyclicDependency`)
//! mean the pipeline definition itself is invalid and abort before any
//! execution. `ProcessFailure` is produced when a build tool exits nonzero;
//! in one-shot mode it propagates the tool's exit code to the shell, in
//! watch mode it is reported and the session keeps running.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteflowError {
    #[error("task '{0}' is already registered")]
    DuplicateTask(String),

    #[error("unknown task '{0}'")]
    UnknownTask(String),

    #[error("cycle detected in task graph involving '{0}'")]
    CyclicDependency(String),

    #[error("port {0} is already in use")]
    PortInUse(u16),

    #[error("task '{task}' failed with exit code {exit_code}")]
    ProcessFailure { task: String, exit_code: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid glob pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error("file watch error: {0}")]
    Notify(#[from] notify::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SiteflowError>;
