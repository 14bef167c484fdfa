// src/registry.rs

//! Task definitions and the task registry.
//!
//! Tasks are registered once at startup and immutable afterwards. The
//! registry turns a requested task into an [`ExecutionPlan`]: a topological
//! ordering of the task's transitive prerequisite closure with no
//! duplicates. Planning is deterministic; ties between unordered siblings
//! are broken by prerequisite declaration order.

use std::collections::HashMap;
use std::path::PathBuf;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{Result, SiteflowError};

/// Public type alias for task names.
pub type TaskName = String;

/// Build mode signalled to external tools, threaded explicitly per
/// invocation rather than through process-wide environment mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    #[default]
    Development,
    Production,
}

impl BuildMode {
    /// Value exported to child processes (`HUGO_ENVIRONMENT` / `NODE_ENV`).
    pub fn env_value(&self) -> &'static str {
        match self {
            BuildMode::Development => "development",
            BuildMode::Production => "production",
        }
    }
}

/// Which kind of watch session a session task starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Dev HTTP server over the output directory plus a reload push channel.
    Reload,
    /// The site generator serves and watches itself; assets are still
    /// watched here, but no reload signal is pushed.
    HugoWatch,
}

/// What running a task actually does.
#[derive(Debug, Clone)]
pub enum Action {
    /// Run an external tool and wait for it to exit.
    Exec {
        program: String,
        args: Vec<String>,
        mode: BuildMode,
    },
    /// Start a long-lived external tool; the task succeeds once the process
    /// is spawned and the process outlives the task.
    Spawn {
        program: String,
        args: Vec<String>,
        mode: BuildMode,
    },
    /// In-process transform: copy every file under `source` into a flat
    /// `dest` directory.
    CopyFlatten { source: PathBuf, dest: PathBuf },
    /// Enter a watch session after the prerequisites have been built.
    /// Handled by the top-level driver, never by the executor.
    Session(SessionKind),
}

/// A named unit of build work with declared prerequisites.
#[derive(Debug, Clone)]
pub struct Task {
    pub name: TaskName,
    pub prerequisites: Vec<TaskName>,
    pub action: Action,
}

/// Topologically sorted task names satisfying a requested task's
/// dependencies. Computed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan(Vec<TaskName>);

impl ExecutionPlan {
    pub fn tasks(&self) -> &[TaskName] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Registry of all tasks, preserving registration order.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
    index: HashMap<TaskName, usize>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task. Fails with `DuplicateTask` if the name is taken;
    /// the first registration is retained unchanged.
    pub fn register(
        &mut self,
        name: impl Into<TaskName>,
        prerequisites: &[&str],
        action: Action,
    ) -> Result<()> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(SiteflowError::DuplicateTask(name));
        }

        self.index.insert(name.clone(), self.tasks.len());
        self.tasks.push(Task {
            name,
            prerequisites: prerequisites.iter().map(|s| s.to_string()).collect(),
            action,
        });
        Ok(())
    }

    /// Look up a task by name.
    pub fn get(&self, name: &str) -> Option<&Task> {
        self.index.get(name).map(|&i| &self.tasks[i])
    }

    /// All tasks in registration order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Compute the execution plan for `name`: depth-first traversal of the
    /// prerequisite closure, emitting each task after all its prerequisites.
    /// Cycles are caught via in-progress marking, unknown names (including
    /// transitive prerequisites) via lookup failure.
    pub fn plan(&self, name: &str) -> Result<ExecutionPlan> {
        let mut marks: HashMap<&str, Mark> = HashMap::new();
        let mut order: Vec<TaskName> = Vec::new();
        self.visit(name, &mut marks, &mut order)?;
        Ok(ExecutionPlan(order))
    }

    fn visit<'a>(
        &'a self,
        name: &str,
        marks: &mut HashMap<&'a str, Mark>,
        order: &mut Vec<TaskName>,
    ) -> Result<()> {
        let task = self
            .get(name)
            .ok_or_else(|| SiteflowError::UnknownTask(name.to_string()))?;

        match marks.get(task.name.as_str()) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::InProgress) => {
                return Err(SiteflowError::CyclicDependency(task.name.clone()));
            }
            None => {}
        }

        marks.insert(task.name.as_str(), Mark::InProgress);
        for dep in &task.prerequisites {
            self.visit(dep, marks, order)?;
        }
        marks.insert(task.name.as_str(), Mark::Done);
        order.push(task.name.clone());
        Ok(())
    }

    /// Whole-registry validation, run once after the pipeline is built:
    /// every prerequisite must refer to a registered task and the graph must
    /// be acyclic. A topological sort over the full graph fails on a cycle.
    pub fn validate(&self) -> Result<()> {
        for task in &self.tasks {
            for dep in &task.prerequisites {
                if !self.index.contains_key(dep) {
                    return Err(SiteflowError::UnknownTask(dep.clone()));
                }
            }
        }

        // Edge direction: dep -> task.
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
        for task in &self.tasks {
            graph.add_node(task.name.as_str());
        }
        for task in &self.tasks {
            for dep in &task.prerequisites {
                graph.add_edge(dep.as_str(), task.name.as_str(), ());
            }
        }

        match toposort(&graph, None) {
            Ok(_order) => Ok(()),
            Err(cycle) => Err(SiteflowError::CyclicDependency(
                cycle.node_id().to_string(),
            )),
        }
    }
}
