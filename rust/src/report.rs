//! Presenter-facing summary of a calculated network.

use std::fmt;

use crate::calendar::TimeUnit;
use crate::config::LayoutConfig;
use crate::critical_path::TaskTiming;
use crate::error::Result;
use crate::layout::Layout;
use crate::models::TaskId;
use crate::registry::ScheduleNetwork;

/// One row of the task table.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskRow {
    pub id: TaskId,
    pub name: String,
    pub duration: f64,
    pub dependencies: Vec<TaskId>,
    pub timing: TaskTiming,
    pub critical: bool,
}

/// Everything a renderer needs to present the network.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkReport {
    pub rows: Vec<TaskRow>,
    /// Critical ids in ascending order. Display order only.
    pub critical_path: Vec<TaskId>,
    /// Sum of durations over the critical ids.
    pub critical_duration: f64,
    pub project_end: f64,
    pub unit: TimeUnit,
    pub layout: Layout,
}

impl NetworkReport {
    pub fn build(
        network: &ScheduleNetwork,
        config: &LayoutConfig,
        unit: TimeUnit,
    ) -> Result<Self> {
        let result = network.result();
        let rows: Vec<TaskRow> = network
            .tasks()
            .iter()
            .map(|task| TaskRow {
                id: task.id,
                name: task.name.clone(),
                duration: task.duration,
                dependencies: task.dependencies.clone(),
                timing: task.timing,
                critical: result.is_critical(task.id),
            })
            .collect();

        let critical_path: Vec<TaskId> = result.critical_path.iter().copied().collect();
        let critical_duration = rows
            .iter()
            .filter(|row| row.critical)
            .map(|row| row.duration)
            .sum();

        Ok(Self {
            rows,
            critical_path,
            critical_duration,
            project_end: result.project_end,
            unit,
            layout: network.layout(config)?,
        })
    }

    /// Critical task names joined as a chain, e.g. `"Design -> Build"`.
    pub fn chain_label(&self) -> String {
        self.critical_path
            .iter()
            .filter_map(|id| self.rows.iter().find(|row| row.id == *id))
            .map(|row| row.name.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// One line per task: `Name (dw) [ES:x, EF:y] <- dependency names`.
    pub fn network_listing(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let deps: Vec<String> = row
                .dependencies
                .iter()
                .map(|dep| {
                    self.rows
                        .iter()
                        .find(|r| r.id == *dep)
                        .map(|r| r.name.clone())
                        .unwrap_or_else(|| dep.to_string())
                })
                .collect();
            out.push_str(&format!(
                "{} ({}{}) [ES:{}, EF:{}]",
                row.name,
                row.duration,
                unit_suffix(self.unit),
                row.timing.earliest_start,
                row.timing.earliest_finish
            ));
            if !deps.is_empty() {
                out.push_str(&format!(" <- {}", deps.join(", ")));
            }
            out.push('\n');
        }
        out
    }
}

fn unit_suffix(unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Days => "d",
        TimeUnit::Weeks => "w",
    }
}

impl fmt::Display for NetworkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>3}  {:<20} {:>8}  {:<12} {:>6} {:>6} {:>6} {:>6} {:>6}",
            "ID", "Task", "Duration", "Dependencies", "ES", "EF", "LS", "LF", "Slack"
        )?;
        for row in &self.rows {
            let deps = if row.dependencies.is_empty() {
                "-".to_string()
            } else {
                row.dependencies
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            writeln!(
                f,
                "{:>3}{} {:<20} {:>8}  {:<12} {:>6} {:>6} {:>6} {:>6} {:>6}",
                row.id,
                if row.critical { "*" } else { " " },
                row.name,
                row.duration,
                deps,
                row.timing.earliest_start,
                row.timing.earliest_finish,
                row.timing.latest_start,
                row.timing.latest_finish,
                row.timing.slack
            )?;
        }

        if !self.critical_path.is_empty() {
            writeln!(f)?;
            writeln!(f, "Critical Path: {}", self.chain_label())?;
            writeln!(
                f,
                "Total Duration: {} {}",
                self.critical_duration,
                self.unit.label()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> ScheduleNetwork {
        let mut network = ScheduleNetwork::new();
        network.add_task_from_text("Design", "2", "").unwrap();
        network.add_task_from_text("Build", "5", "1").unwrap();
        network.add_task_from_text("Docs", "1", "1").unwrap();
        network.add_task_from_text("Release", "3", "2, 3").unwrap();
        network
    }

    fn report(network: &ScheduleNetwork) -> NetworkReport {
        NetworkReport::build(network, &LayoutConfig::default(), TimeUnit::Weeks).unwrap()
    }

    #[test]
    fn test_report_rows_and_totals() {
        let report = report(&diamond());

        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.critical_path, vec![1, 2, 4]);
        assert_eq!(report.critical_duration, 10.0);
        assert_eq!(report.project_end, 10.0);
        assert!(!report.rows[2].critical);
        assert_eq!(report.rows[2].timing.slack, 4.0);
        assert_eq!(report.layout.nodes.len(), 6);
    }

    #[test]
    fn test_chain_label() {
        assert_eq!(report(&diamond()).chain_label(), "Design -> Build -> Release");
    }

    #[test]
    fn test_critical_duration_sums_parallel_branches() {
        // Two equal branches are both critical; the sum exceeds project end
        let mut network = ScheduleNetwork::new();
        network.add_task("A", 4.0, &[]).unwrap();
        network.add_task("B", 4.0, &[]).unwrap();
        let report = report(&network);
        assert_eq!(report.critical_path, vec![1, 2]);
        assert_eq!(report.critical_duration, 8.0);
        assert_eq!(report.project_end, 4.0);
    }

    #[test]
    fn test_network_listing() {
        let listing = report(&diamond()).network_listing();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines[0], "Design (2w) [ES:0, EF:2]");
        assert_eq!(lines[3], "Release (3w) [ES:7, EF:10] <- Build, Docs");
    }

    #[test]
    fn test_display() {
        let text = report(&diamond()).to_string();
        assert!(text.contains("Critical Path: Design -> Build -> Release"));
        assert!(text.contains("Total Duration: 10 weeks"));
        assert!(text.lines().nth(1).unwrap().starts_with("  1*"));
        assert!(text.lines().nth(3).unwrap().starts_with("  3 "));
    }

    #[test]
    fn test_empty_report() {
        let report = report(&ScheduleNetwork::new());
        assert!(report.rows.is_empty());
        assert!(report.layout.is_empty());
        assert_eq!(report.chain_label(), "");
        assert!(!report.to_string().contains("Critical Path"));
    }
}
