// src/pipeline.rs

//! The fixed site pipeline: task registrations and watch rules.
//!
//! This is where the build graph lives. Argument lists are constructed from
//! [`SiteConfig`]; the draft/future preview flags are appended on top of the
//! base generator arguments, so a preview invocation is always a superset of
//! the plain one.

use std::path::PathBuf;

use crate::config::SiteConfig;
use crate::errors::Result;
use crate::registry::{Action, BuildMode, SessionKind, TaskRegistry};
use crate::watch::WatchRule;

/// Flags that include draft and future-dated content in a generator run.
pub const PREVIEW_ARGS: &[&str] = &["--buildDrafts", "--buildFuture"];

/// Environment variable that, when set, makes `hugo-watch` include
/// draft/future content as well.
pub const PREVIEW_ENV: &str = "HUGO_PREVIEW";

/// Base arguments for a site-generator run.
fn hugo_args(cfg: &SiteConfig) -> Vec<String> {
    vec![
        "-d".into(),
        cfg.hugo.output.clone(),
        "-s".into(),
        cfg.hugo.source.clone(),
        "-v".into(),
    ]
}

fn hugo_preview_args(cfg: &SiteConfig) -> Vec<String> {
    let mut args = hugo_args(cfg);
    args.extend(PREVIEW_ARGS.iter().map(|s| s.to_string()));
    args
}

/// Arguments for the generator's own watch server (`hugo server -w`).
fn hugo_watch_args(cfg: &SiteConfig) -> Vec<String> {
    let mut args = vec!["server".to_string()];
    args.extend(hugo_args(cfg));
    args.push("-w".into());
    args.push("-p".into());
    args.push(cfg.server.port.to_string());
    if std::env::var_os(PREVIEW_ENV).is_some() {
        args.extend(PREVIEW_ARGS.iter().map(|s| s.to_string()));
    }
    args
}

fn hugo_exec(cfg: &SiteConfig, args: Vec<String>, mode: BuildMode) -> Action {
    Action::Exec {
        program: cfg.hugo.bin.clone(),
        args,
        mode,
    }
}

/// Register every pipeline task and validate the resulting graph.
pub fn build_registry(cfg: &SiteConfig) -> Result<TaskRegistry> {
    let mut reg = TaskRegistry::new();

    reg.register(
        "hugo",
        &[],
        hugo_exec(cfg, hugo_args(cfg), BuildMode::Development),
    )?;
    reg.register(
        "hugo-preview",
        &[],
        hugo_exec(cfg, hugo_preview_args(cfg), BuildMode::Development),
    )?;

    reg.register(
        "css",
        &[],
        Action::Exec {
            program: cfg.css.bin.clone(),
            args: vec![cfg.css.source.clone(), "--dir".into(), cfg.css.output.clone()],
            mode: BuildMode::Development,
        },
    )?;
    reg.register(
        "js",
        &[],
        Action::Exec {
            program: cfg.js.bin.clone(),
            args: vec!["--config".into(), cfg.js.config.clone()],
            mode: BuildMode::Development,
        },
    )?;
    reg.register(
        "fonts",
        &[],
        Action::CopyFlatten {
            source: PathBuf::from(&cfg.fonts.source),
            dest: PathBuf::from(&cfg.fonts.output),
        },
    )?;

    reg.register(
        "build",
        &["css", "js", "fonts"],
        hugo_exec(cfg, hugo_args(cfg), BuildMode::Production),
    )?;
    reg.register(
        "build-preview",
        &["css", "js", "fonts"],
        hugo_exec(cfg, hugo_preview_args(cfg), BuildMode::Production),
    )?;

    reg.register(
        "hugo-watch",
        &[],
        Action::Spawn {
            program: cfg.hugo.bin.clone(),
            args: hugo_watch_args(cfg),
            mode: BuildMode::Development,
        },
    )?;

    reg.register(
        "server",
        &["hugo", "css", "js", "fonts"],
        Action::Session(SessionKind::Reload),
    )?;
    reg.register(
        "server-hugo",
        &["hugo-watch", "css", "js", "fonts"],
        Action::Session(SessionKind::HugoWatch),
    )?;

    reg.validate()?;
    Ok(reg)
}

/// Watch rules for a session. In `HugoWatch` mode the generator watches the
/// site tree itself, so only asset rules are registered here.
pub fn watch_rules(cfg: &SiteConfig, kind: SessionKind) -> Vec<WatchRule> {
    let mut rules = vec![
        WatchRule::new("js", vec![format!("{}/**/*.js", cfg.js.source)]),
        WatchRule::new("css", vec![format!("{}/**/*.css", cfg.css.source)]),
        WatchRule::new("fonts", vec![format!("{}/**/*", cfg.fonts.source)]),
    ];

    if kind == SessionKind::Reload {
        rules.push(WatchRule::new(
            "hugo",
            vec![format!("{}/**/*", cfg.hugo.source)],
        ));
    }

    rules
}
