// src/watch/patterns.rs

use std::fmt;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::errors::Result;
use crate::registry::TaskName;

/// A set of path-glob patterns paired with the task to re-run on match.
/// Registered at startup, immutable for the life of the watch session.
#[derive(Debug, Clone)]
pub struct WatchRule {
    pub task: TaskName,
    pub patterns: Vec<String>,
}

impl WatchRule {
    pub fn new(task: impl Into<TaskName>, patterns: Vec<String>) -> Self {
        Self {
            task: task.into(),
            patterns,
        }
    }
}

/// Compiled glob set for a single rule.
///
/// Patterns are evaluated against paths relative to the project root, with
/// forward slashes (e.g. `"src/css/main.css"`).
#[derive(Clone)]
pub struct CompiledRule {
    task: TaskName,
    set: GlobSet,
}

impl fmt::Debug for CompiledRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRule")
            .field("task", &self.task)
            .finish_non_exhaustive()
    }
}

impl CompiledRule {
    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn matches(&self, rel_path: &str) -> bool {
        self.set.is_match(rel_path)
    }
}

/// Compile every rule's patterns into a matcher.
pub fn compile_rules(rules: &[WatchRule]) -> Result<Vec<CompiledRule>> {
    let mut compiled = Vec::with_capacity(rules.len());

    for rule in rules {
        let mut builder = GlobSetBuilder::new();
        for pat in &rule.patterns {
            builder.add(Glob::new(pat)?);
        }
        compiled.push(CompiledRule {
            task: rule.task.clone(),
            set: builder.build()?,
        });
    }

    Ok(compiled)
}
