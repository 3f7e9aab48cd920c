//! Types for critical path calculation.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::TaskId;

/// Slack below this magnitude counts as zero.
pub const DEFAULT_CRITICAL_TOLERANCE: f64 = 1e-9;

/// Per-task timing information for critical path calculation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: f64,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: f64,
    /// Latest allowable start time (from backward pass).
    pub latest_start: f64,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: f64,
    /// Slack = latest_start - earliest_start.
    pub slack: f64,
}

impl TaskTiming {
    pub fn is_critical(&self) -> bool {
        self.is_critical_within(DEFAULT_CRITICAL_TOLERANCE)
    }

    pub fn is_critical_within(&self, tolerance: f64) -> bool {
        self.slack.abs() <= tolerance
    }

    /// Timing of a zero-length milestone pinned at `at`.
    pub fn milestone(at: f64) -> Self {
        Self {
            earliest_start: at,
            earliest_finish: at,
            latest_start: at,
            latest_finish: at,
            slack: 0.0,
        }
    }
}

/// Result of a full network calculation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkResult {
    /// Timing for every task, keyed by id.
    pub timings: BTreeMap<TaskId, TaskTiming>,
    /// Ids of tasks with zero slack. Not necessarily a single chain.
    pub critical_path: BTreeSet<TaskId>,
    /// Largest earliest finish over all tasks (0 with no tasks).
    pub project_end: f64,
    /// Sum of all task durations.
    pub total_work: f64,
}

impl NetworkResult {
    pub fn is_empty(&self) -> bool {
        self.timings.is_empty()
    }

    pub fn timing(&self, id: TaskId) -> Option<&TaskTiming> {
        self.timings.get(&id)
    }

    pub fn is_critical(&self, id: TaskId) -> bool {
        self.critical_path.contains(&id)
    }
}
