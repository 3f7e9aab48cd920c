//! Random sample networks for demos.

use rand::Rng;

use crate::error::Result;
use crate::models::{Task, TaskId};
use crate::registry::ScheduleNetwork;

/// Names drawn for generated tasks; each is suffixed with the task id.
pub const TASK_NAMES: [&str; 7] = [
    "Design",
    "Development",
    "Testing",
    "Review",
    "Deployment",
    "Planning",
    "Analysis",
];

pub const MIN_TASKS: usize = 3;
pub const MAX_TASKS: usize = 7;
pub const MAX_DURATION: u32 = 10;

/// Generate seed tasks for a small acyclic network.
///
/// Task 1 is the only guaranteed source, tasks 2 and 3 extend a chain from
/// it, and every later task depends on one or two distinct earlier tasks.
/// Durations are whole units in `1..=MAX_DURATION`.
pub fn random_tasks<R: Rng + ?Sized>(rng: &mut R) -> Vec<Task> {
    let count = rng.random_range(MIN_TASKS..=MAX_TASKS);
    let mut tasks = Vec::with_capacity(count);

    for i in 1..=count as TaskId {
        let name = format!(
            "{} {}",
            TASK_NAMES[rng.random_range(0..TASK_NAMES.len())],
            i
        );
        let duration = f64::from(rng.random_range(1..=MAX_DURATION));

        let dependencies = match i {
            1 => Vec::new(),
            2 | 3 => vec![i - 1],
            _ => {
                let wanted = rng.random_range(1..=2).min(i - 1);
                let mut deps: Vec<TaskId> = Vec::with_capacity(wanted as usize);
                for _ in 0..wanted {
                    let dep = rng.random_range(1..i);
                    if !deps.contains(&dep) {
                        deps.push(dep);
                    }
                }
                deps
            }
        };

        tasks.push(Task::new(i, name, duration, dependencies));
    }

    tasks
}

impl ScheduleNetwork {
    /// Replace the network with a freshly generated sample.
    pub fn generate_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let seeds = random_tasks(rng);
        self.load_tasks(&seeds)
    }
}
