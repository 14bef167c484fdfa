// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `siteflow`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "siteflow",
    version,
    about = "Build and serve a Hugo site: task pipeline, file watching, live reload.",
    long_about = None
)]
pub struct CliArgs {
    /// Task to run: hugo, hugo-preview, css, js, fonts, build,
    /// build-preview, server, server-hugo.
    #[arg(value_name = "TASK", default_value = "build")]
    pub task: String,

    /// Path to the config file (TOML).
    ///
    /// A missing file is not an error; built-in defaults are used.
    #[arg(long, value_name = "PATH", default_value = "Siteflow.toml")]
    pub config: String,

    /// Override the dev-server port from the config file.
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Print the resolved execution plan without running anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SITEFLOW_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
