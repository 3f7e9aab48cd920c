//! Critical path calculation using forward and backward passes.

use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use thiserror::Error;

use crate::config::NetworkConfig;
use crate::models::{Task, TaskId};
use crate::{log_checks, log_debug};

use super::types::{NetworkResult, TaskTiming};

/// Reverse dependency map: task id -> ids of tasks that depend on it.
pub type DependentsMap = FxHashMap<TaskId, Vec<TaskId>>;

/// Error types for critical path calculation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Circular dependency detected among tasks {unresolved:?}")]
    CycleDetected { unresolved: Vec<TaskId> },
    #[error("Duplicate task id: {0}")]
    DuplicateTaskId(TaskId),
}

/// Build the dependents map once per computation.
///
/// Dependencies naming ids absent from `tasks` are skipped. Each dependent
/// appears in insertion order.
pub fn build_dependents_map(tasks: &[Task]) -> DependentsMap {
    let known: FxHashSet<TaskId> = tasks.iter().map(|t| t.id).collect();
    let mut dependents: DependentsMap =
        FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
    for task in tasks {
        for dep_id in &task.dependencies {
            if known.contains(dep_id) {
                dependents.entry(*dep_id).or_default().push(task.id);
            }
        }
    }
    dependents
}

/// Position of each task in the input slice, keyed by id.
fn index_positions(tasks: &[Task]) -> Result<FxHashMap<TaskId, usize>, NetworkError> {
    let mut positions = FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
    for (pos, task) in tasks.iter().enumerate() {
        if positions.insert(task.id, pos).is_some() {
            return Err(NetworkError::DuplicateTaskId(task.id));
        }
    }
    Ok(positions)
}

/// Determine the order in which the forward pass visits tasks.
///
/// Tasks built through the registry only ever depend on lower ids, so plain
/// id order is a valid topological order. A list containing a forward
/// reference falls back to Kahn's algorithm.
fn evaluation_order(
    tasks: &[Task],
    positions: &FxHashMap<TaskId, usize>,
    dependents: &DependentsMap,
    verbosity: u8,
) -> Result<Vec<usize>, NetworkError> {
    let mut by_id: Vec<usize> = (0..tasks.len()).collect();
    by_id.sort_by_key(|&pos| tasks[pos].id);

    let forward_reference = tasks.iter().any(|task| {
        task.dependencies
            .iter()
            .any(|dep| *dep >= task.id && positions.contains_key(dep))
    });
    if !forward_reference {
        return Ok(by_id);
    }

    log_checks!(
        verbosity,
        "Forward dependency reference found, deriving topological order"
    );

    // In-degree counts only dependencies on tasks that are present
    let mut in_degree: Vec<usize> = tasks
        .iter()
        .map(|t| {
            t.dependencies
                .iter()
                .filter(|dep| positions.contains_key(*dep))
                .count()
        })
        .collect();

    let mut queue: VecDeque<usize> = by_id
        .iter()
        .copied()
        .filter(|&pos| in_degree[pos] == 0)
        .collect();

    let mut order: Vec<usize> = Vec::with_capacity(tasks.len());

    while let Some(pos) = queue.pop_front() {
        order.push(pos);

        if let Some(children) = dependents.get(&tasks[pos].id) {
            for child_id in children {
                let child = positions[child_id];
                in_degree[child] -= 1;
                if in_degree[child] == 0 {
                    queue.push_back(child);
                }
            }
        }
    }

    if order.len() != tasks.len() {
        let mut unresolved: Vec<TaskId> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree > 0)
            .map(|(pos, _)| tasks[pos].id)
            .collect();
        unresolved.sort_unstable();
        return Err(NetworkError::CycleDetected { unresolved });
    }

    Ok(order)
}

/// Calculate early/late times, slack and the critical path for every task.
///
/// # Arguments
/// * `tasks` - Tasks in insertion order; need not be topologically sorted
/// * `config` - Verbosity and the tolerance used to decide zero slack
///
/// # Returns
/// * `Ok(NetworkResult)` with one timing per task
/// * `Err(NetworkError::CycleDetected)` if the dependencies form a cycle
/// * `Err(NetworkError::DuplicateTaskId)` if two tasks share an id
pub fn calculate_network(
    tasks: &[Task],
    config: &NetworkConfig,
) -> Result<NetworkResult, NetworkError> {
    if tasks.is_empty() {
        return Ok(NetworkResult::default());
    }

    let verbosity = config.verbosity;
    let positions = index_positions(tasks)?;
    let dependents = build_dependents_map(tasks);
    let order = evaluation_order(tasks, &positions, &dependents, verbosity)?;

    let mut timings = vec![TaskTiming::default(); tasks.len()];
    let mut total_work = 0.0;

    // Forward pass: earliest start = max earliest finish of dependencies
    for &pos in &order {
        let task = &tasks[pos];
        total_work += task.duration;

        let earliest_start = task
            .dependencies
            .iter()
            .filter_map(|dep| positions.get(dep))
            .map(|&dep_pos| timings[dep_pos].earliest_finish)
            .fold(0.0, f64::max);

        let timing = &mut timings[pos];
        timing.earliest_start = earliest_start;
        timing.earliest_finish = earliest_start + task.duration;
    }

    let project_end = timings
        .iter()
        .map(|t| t.earliest_finish)
        .fold(0.0, f64::max);

    // Backward pass: latest finish = min latest start of dependents
    for &pos in order.iter().rev() {
        let task = &tasks[pos];

        let latest_finish = match dependents.get(&task.id) {
            Some(children) if !children.is_empty() => children
                .iter()
                .map(|child| timings[positions[child]].latest_start)
                .fold(f64::INFINITY, f64::min),
            _ => project_end,
        };

        let timing = &mut timings[pos];
        timing.latest_finish = latest_finish;
        timing.latest_start = latest_finish - task.duration;
        timing.slack = timing.latest_start - timing.earliest_start;

        log_debug!(
            verbosity,
            "  Task {} ({}): ES={} EF={} LS={} LF={} slack={}",
            task.id,
            task.name,
            timing.earliest_start,
            timing.earliest_finish,
            timing.latest_start,
            timing.latest_finish,
            timing.slack
        );
    }

    let critical_path: BTreeSet<TaskId> = tasks
        .iter()
        .zip(&timings)
        .filter(|(_, timing)| timing.is_critical_within(config.critical_tolerance))
        .map(|(task, _)| task.id)
        .collect();

    let timings: BTreeMap<TaskId, TaskTiming> = tasks
        .iter()
        .zip(timings)
        .map(|(task, timing)| (task.id, timing))
        .collect();

    Ok(NetworkResult {
        timings,
        critical_path,
        project_end,
        total_work,
    })
}

/// Copy computed timings onto the tasks they belong to.
///
/// Tasks absent from `result` are reset to zero timing.
pub fn apply_timings(tasks: &mut [Task], result: &NetworkResult) {
    for task in tasks.iter_mut() {
        task.timing = result.timing(task.id).copied().unwrap_or_default();
    }
}
