//! Core data types for the precedence network.

use crate::critical_path::TaskTiming;

/// Task identifier. User tasks are numbered from 1; 0 is reserved for the
/// synthetic Start node.
pub type TaskId = u32;

/// A task in the precedence network.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    /// Duration in abstract time units (weeks in the usual presentation).
    pub duration: f64,
    /// Ids of tasks that must finish before this one starts.
    pub dependencies: Vec<TaskId>,
    /// Values from the last computation; all zero until then.
    pub timing: TaskTiming,
}

impl Task {
    pub fn new(
        id: TaskId,
        name: impl Into<String>,
        duration: f64,
        dependencies: Vec<TaskId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            duration,
            dependencies,
            timing: TaskTiming::default(),
        }
    }

    /// A task with no dependencies starts the network.
    pub fn is_source(&self) -> bool {
        self.dependencies.is_empty()
    }

    pub fn depends_on(&self, id: TaskId) -> bool {
        self.dependencies.contains(&id)
    }
}
