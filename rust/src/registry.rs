//! Task registry: the owned, append-only list of tasks plus its latest result.
//!
//! Dependency input is validated in two visible steps: [`parse_ids`] turns
//! free-form text into integers, then [`filter_existing`] keeps only ids that
//! name a task already in the registry. Anything else is dropped silently.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::config::{LayoutConfig, NetworkConfig};
use crate::critical_path::{apply_timings, calculate_network, NetworkResult};
use crate::error::Result;
use crate::layout::{plan_layout, Layout};
use crate::models::{Task, TaskId};
use crate::{log_changes, log_checks};

/// Reasons a task is refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Task name must not be empty")]
    EmptyName,
    #[error("Duration is not a number: {0:?}")]
    InvalidDuration(String),
    #[error("Duration must be a finite number greater than zero, got {0}")]
    NonPositiveDuration(f64),
}

/// Pending form input for the next task.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub name: String,
    pub duration: String,
    pub dependencies: String,
}

impl TaskInput {
    pub fn new(
        name: impl Into<String>,
        duration: impl Into<String>,
        dependencies: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            duration: duration.into(),
            dependencies: dependencies.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.duration.is_empty() && self.dependencies.is_empty()
    }
}

/// Parse a comma-separated list of ids.
///
/// Each entry contributes its leading integer (`"2.5"` and `"2x"` both give
/// 2). Entries without leading digits are skipped.
pub fn parse_ids(text: &str) -> Vec<i64> {
    text.split(',').filter_map(leading_integer).collect()
}

/// Optional sign followed by the leading digits of a trimmed entry.
fn leading_integer(part: &str) -> Option<i64> {
    let part = part.trim();
    let sign_len = usize::from(part.starts_with(&['+', '-'][..]));
    let digit_len = part[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digit_len == 0 {
        return None;
    }
    part[..sign_len + digit_len].parse().ok()
}

/// Keep the ids that name an existing task, in input order, without repeats.
pub fn filter_existing(ids: &[i64], tasks: &[Task]) -> Vec<TaskId> {
    let existing: FxHashSet<TaskId> = tasks.iter().map(|t| t.id).collect();
    let mut seen = FxHashSet::default();
    ids.iter()
        .filter_map(|&id| TaskId::try_from(id).ok())
        .filter(|id| existing.contains(id))
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Parse duration text, accepting only finite numbers greater than zero.
pub fn parse_duration(text: &str) -> std::result::Result<f64, ValidationError> {
    let trimmed = text.trim();
    let duration: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidDuration(trimmed.to_string()))?;
    validate_duration(duration)?;
    Ok(duration)
}

fn validate_duration(duration: f64) -> std::result::Result<(), ValidationError> {
    if duration.is_nan() {
        return Err(ValidationError::InvalidDuration(duration.to_string()));
    }
    if !duration.is_finite() || duration <= 0.0 {
        return Err(ValidationError::NonPositiveDuration(duration));
    }
    Ok(())
}

fn validate_name(name: &str) -> std::result::Result<&str, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name)
}

/// An explicitly owned precedence network.
///
/// Holds the task list, the pending form input and the result of the most
/// recent calculation. Every successful mutation recalculates, and a result
/// is only ever replaced as a whole.
#[derive(Clone, Debug, Default)]
pub struct ScheduleNetwork {
    tasks: Vec<Task>,
    result: NetworkResult,
    input: TaskInput,
    config: NetworkConfig,
}

impl ScheduleNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NetworkConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Result of the most recent calculation.
    pub fn result(&self) -> &NetworkResult {
        &self.result
    }

    pub fn input(&self) -> &TaskInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TaskInput {
        &mut self.input
    }

    /// Id the next added task will receive.
    pub fn next_id(&self) -> TaskId {
        self.tasks.len() as TaskId + 1
    }

    /// Add a task with already-parsed dependency candidates.
    ///
    /// Candidates that do not name an existing task are dropped. On rejection
    /// nothing changes.
    pub fn add_task(
        &mut self,
        name: &str,
        duration: f64,
        dependencies: &[i64],
    ) -> Result<TaskId> {
        let name = validate_name(name)?;
        validate_duration(duration)?;

        let deps = filter_existing(dependencies, &self.tasks);
        if deps.len() < dependencies.len() {
            log_checks!(
                self.config.verbosity,
                "Dropped dependencies {:?} for {:?}, kept {:?}",
                dependencies,
                name,
                deps
            );
        }

        let id = self.next_id();
        let mut tasks = self.tasks.clone();
        tasks.push(Task::new(id, name, duration, deps));
        self.commit(tasks)?;

        log_changes!(
            self.config.verbosity,
            "Added task {} {:?} (duration {})",
            id,
            name,
            duration
        );
        Ok(id)
    }

    /// Add a task from raw form text.
    pub fn add_task_from_text(
        &mut self,
        name: &str,
        duration_text: &str,
        dependencies_text: &str,
    ) -> Result<TaskId> {
        validate_name(name)?;
        let duration = parse_duration(duration_text)?;
        self.add_task(name, duration, &parse_ids(dependencies_text))
    }

    /// Add a task from the pending input, resetting the input on success.
    pub fn submit_input(&mut self) -> Result<TaskId> {
        let TaskInput {
            name,
            duration,
            dependencies,
        } = self.input.clone();
        let id = self.add_task_from_text(&name, &duration, &dependencies)?;
        self.reset_input();
        Ok(id)
    }

    pub fn reset_input(&mut self) {
        self.input = TaskInput::default();
    }

    /// Replace every task with `seeds`, renumbering from 1.
    ///
    /// Each seed is added in order through the normal validation path, so its
    /// dependencies are read against the new numbering and must point at
    /// earlier seeds. All-or-nothing.
    pub fn load_tasks(&mut self, seeds: &[Task]) -> Result<()> {
        let mut staged = ScheduleNetwork::with_config(self.config.clone());
        for seed in seeds {
            let deps: Vec<i64> = seed.dependencies.iter().map(|&d| i64::from(d)).collect();
            staged.add_task(&seed.name, seed.duration, &deps)?;
        }
        self.tasks = staged.tasks;
        self.result = staged.result;
        self.reset_input();

        log_changes!(
            self.config.verbosity,
            "Loaded {} tasks, project end {}",
            self.tasks.len(),
            self.result.project_end
        );
        Ok(())
    }

    /// Recalculate the network from the current tasks.
    pub fn calculate(&mut self) -> Result<&NetworkResult> {
        let tasks = self.tasks.clone();
        self.commit(tasks)?;
        Ok(&self.result)
    }

    /// Lay out the diagram for the current tasks and result.
    pub fn layout(&self, config: &LayoutConfig) -> Result<Layout> {
        Ok(plan_layout(&self.tasks, &self.result, config)?)
    }

    /// Drop every task, the critical path and the pending input.
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.result = NetworkResult::default();
        self.reset_input();
        log_changes!(self.config.verbosity, "Cleared network");
    }

    /// Calculate `tasks` and install them with their result, or change nothing.
    fn commit(&mut self, mut tasks: Vec<Task>) -> Result<()> {
        let result = calculate_network(&tasks, &self.config)?;
        apply_timings(&mut tasks, &result);
        self.tasks = tasks;
        self.result = result;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::BTreeSet;

    fn chain() -> ScheduleNetwork {
        let mut network = ScheduleNetwork::new();
        network.add_task("Task1", 5.0, &[]).unwrap();
        network.add_task("Task2", 3.0, &[1]).unwrap();
        network.add_task("Task3", 2.0, &[2]).unwrap();
        network
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_ids("1, 2,3"), vec![1, 2, 3]);
        assert_eq!(parse_ids("99, abc, 1"), vec![99, 1]);
        assert_eq!(parse_ids(""), Vec::<i64>::new());
        assert_eq!(parse_ids(" , -4, 2.5"), vec![-4, 2]);
        assert_eq!(parse_ids("1.5, 2x, +3, x2, -"), vec![1, 2, 3]);
    }

    #[test]
    fn test_filter_existing() {
        let tasks = vec![Task::new(1, "A", 1.0, vec![]), Task::new(2, "B", 1.0, vec![])];
        assert_eq!(filter_existing(&[99, 1], &tasks), vec![1]);
        assert_eq!(filter_existing(&[2, 1, 2], &tasks), vec![2, 1]);
        assert_eq!(filter_existing(&[-1, 0, 3], &tasks), Vec::<TaskId>::new());
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration(" 7 "), Ok(7.0));
        assert_eq!(parse_duration("2.5"), Ok(2.5));
        assert!(matches!(
            parse_duration("soon"),
            Err(ValidationError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration("NaN"),
            Err(ValidationError::InvalidDuration(_))
        ));
        assert_eq!(parse_duration("0"), Err(ValidationError::NonPositiveDuration(0.0)));
        assert!(parse_duration("inf").is_err());
    }

    #[test]
    fn test_ids_are_sequential() {
        let network = chain();
        let ids: Vec<TaskId> = network.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(network.next_id(), 4);
    }

    #[test]
    fn test_add_recalculates() {
        let network = chain();
        assert_eq!(network.result().project_end, 10.0);
        assert_eq!(network.result().critical_path, BTreeSet::from([1, 2, 3]));

        let task2 = network.task(2).unwrap();
        assert_eq!(task2.timing.earliest_start, 5.0);
        assert_eq!(task2.timing.latest_finish, 8.0);
    }

    #[test]
    fn test_invalid_add_rejected() {
        let mut network = chain();
        let before = network.tasks().to_vec();

        assert_eq!(
            network.add_task("", 5.0, &[]),
            Err(Error::Validation(ValidationError::EmptyName))
        );
        assert_eq!(
            network.add_task("X", 0.0, &[]),
            Err(Error::Validation(ValidationError::NonPositiveDuration(0.0)))
        );
        assert!(network.add_task("X", -1.0, &[]).is_err());
        assert!(network.add_task("X", f64::NAN, &[]).is_err());
        assert!(network.add_task("X", f64::INFINITY, &[]).is_err());
        assert!(network.add_task_from_text("", "5", "").is_err());
        assert!(network.add_task_from_text("X", "0", "").is_err());
        assert!(network.add_task_from_text("X", "-1", "").is_err());

        assert_eq!(network.tasks(), before.as_slice());
        assert_eq!(network.next_id(), 4);
    }

    #[test]
    fn test_dependency_filtering() {
        let mut network = ScheduleNetwork::new();
        network.add_task("X", 2.0, &[]).unwrap();
        let id = network.add_task_from_text("Y", "3", "99, abc, 1").unwrap();
        assert_eq!(network.task(id).unwrap().dependencies, vec![1]);
    }

    #[test]
    fn test_names_are_trimmed() {
        let mut network = ScheduleNetwork::new();
        assert_eq!(
            network.add_task("   ", 1.0, &[]),
            Err(Error::Validation(ValidationError::EmptyName))
        );
        let id = network.add_task("  Design ", 1.0, &[]).unwrap();
        assert_eq!(network.task(id).unwrap().name, "Design");
    }

    #[test]
    fn test_dependency_text_uses_leading_integer() {
        let mut network = ScheduleNetwork::new();
        network.add_task("A", 5.0, &[]).unwrap();
        let b = network.add_task_from_text("B", "3", "1.5").unwrap();
        let c = network.add_task_from_text("C", "3", "2x").unwrap();
        assert_eq!(network.task(b).unwrap().dependencies, vec![1]);
        assert_eq!(network.task(c).unwrap().dependencies, vec![2]);
    }

    #[test]
    fn test_unknown_dependencies_make_a_source() {
        let mut network = ScheduleNetwork::new();
        let id = network.add_task_from_text("Solo", "4", "7, 8").unwrap();
        let task = network.task(id).unwrap();
        assert!(task.is_source());
        assert_eq!(task.timing.earliest_start, 0.0);
    }

    #[test]
    fn test_self_reference_dropped() {
        let mut network = ScheduleNetwork::new();
        // Id 1 does not exist yet when task 1 is validated
        let id = network.add_task_from_text("A", "1", "1").unwrap();
        assert!(network.task(id).unwrap().dependencies.is_empty());
    }

    #[test]
    fn test_submit_input_resets_on_success() {
        let mut network = ScheduleNetwork::new();
        *network.input_mut() = TaskInput::new("Design", "5", "");
        assert_eq!(network.submit_input(), Ok(1));
        assert!(network.input().is_empty());

        *network.input_mut() = TaskInput::new("", "5", "1");
        assert!(network.submit_input().is_err());
        assert_eq!(network.input().dependencies, "1");
        assert_eq!(network.len(), 1);
    }

    #[test]
    fn test_clear_resets_numbering() {
        let mut network = chain();
        network.input_mut().name = "pending".to_string();
        network.clear();

        assert!(network.is_empty());
        assert!(network.result().critical_path.is_empty());
        assert_eq!(network.result().project_end, 0.0);
        assert!(network.input().is_empty());
        assert_eq!(network.add_task("Again", 1.0, &[]), Ok(1));
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let mut network = chain();
        let first = network.calculate().unwrap().clone();
        let second = network.calculate().unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_tasks_renumbers_and_filters() {
        let mut network = chain();
        let seeds = vec![
            Task::new(10, "Planning", 2.0, vec![]),
            Task::new(11, "Design", 5.0, vec![1]),
            Task::new(12, "Review", 1.0, vec![1, 2, 5]),
        ];
        network.load_tasks(&seeds).unwrap();

        let ids: Vec<TaskId> = network.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(network.task(3).unwrap().dependencies, vec![1, 2]);
        assert_eq!(network.result().project_end, 8.0);
    }

    #[test]
    fn test_load_tasks_is_all_or_nothing() {
        let mut network = chain();
        let seeds = vec![
            Task::new(1, "Good", 2.0, vec![]),
            Task::new(2, "Bad", 0.0, vec![1]),
        ];
        assert!(network.load_tasks(&seeds).is_err());
        assert_eq!(network.len(), 3);
        assert_eq!(network.result().project_end, 10.0);
    }
}
