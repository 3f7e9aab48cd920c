//! Calendar projection of network times.
//!
//! Network times are abstract offsets from project start. Projecting them
//! onto dates rounds fractional days up, so a task never appears to finish
//! earlier on the calendar than its offset allows.

use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::critical_path::NetworkResult;
use crate::models::TaskId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalendarError {
    #[error("Offset {offset} from {start} falls outside the supported date range")]
    DateOutOfRange { start: NaiveDate, offset: f64 },
}

/// Unit of task durations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Days,
    #[default]
    Weeks,
}

impl TimeUnit {
    pub fn days_per_unit(self) -> f64 {
        match self {
            TimeUnit::Days => 1.0,
            TimeUnit::Weeks => 7.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Days => "days",
            TimeUnit::Weeks => "weeks",
        }
    }
}

/// Calendar dates for one task's computed times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskDates {
    pub earliest_start: NaiveDate,
    pub earliest_finish: NaiveDate,
    pub latest_start: NaiveDate,
    pub latest_finish: NaiveDate,
}

/// Date reached `offset` units after `start`.
pub fn offset_date(
    start: NaiveDate,
    offset: f64,
    unit: TimeUnit,
) -> Result<NaiveDate, CalendarError> {
    let out_of_range = || CalendarError::DateOutOfRange { start, offset };
    let days = (offset * unit.days_per_unit()).ceil();
    if !days.is_finite() || days.abs() > i32::MAX as f64 {
        return Err(out_of_range());
    }
    start
        .checked_add_signed(Duration::days(days as i64))
        .ok_or_else(out_of_range)
}

/// Project every task's times onto the calendar.
pub fn project_dates(
    result: &NetworkResult,
    start: NaiveDate,
    unit: TimeUnit,
) -> Result<BTreeMap<TaskId, TaskDates>, CalendarError> {
    result
        .timings
        .iter()
        .map(|(&id, timing)| {
            Ok((
                id,
                TaskDates {
                    earliest_start: offset_date(start, timing.earliest_start, unit)?,
                    earliest_finish: offset_date(start, timing.earliest_finish, unit)?,
                    latest_start: offset_date(start, timing.latest_start, unit)?,
                    latest_finish: offset_date(start, timing.latest_finish, unit)?,
                },
            ))
        })
        .collect()
}

/// Calendar date of project completion.
pub fn project_end_date(
    result: &NetworkResult,
    start: NaiveDate,
    unit: TimeUnit,
) -> Result<NaiveDate, CalendarError> {
    offset_date(start, result.project_end, unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::critical_path::calculate_network;
    use crate::models::Task;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_offset_date_weeks() {
        let start = date(2025, 1, 6);
        assert_eq!(offset_date(start, 0.0, TimeUnit::Weeks), Ok(start));
        assert_eq!(offset_date(start, 2.0, TimeUnit::Weeks), Ok(date(2025, 1, 20)));
    }

    #[test]
    fn test_offset_date_rounds_up() {
        let start = date(2025, 1, 6);
        // 1.5 weeks = 10.5 days -> 11
        assert_eq!(offset_date(start, 1.5, TimeUnit::Weeks), Ok(date(2025, 1, 17)));
        assert_eq!(offset_date(start, 0.25, TimeUnit::Days), Ok(date(2025, 1, 7)));
    }

    #[test]
    fn test_offset_date_out_of_range() {
        let start = date(2025, 1, 6);
        assert!(offset_date(start, f64::INFINITY, TimeUnit::Days).is_err());
        assert!(offset_date(start, 1e12, TimeUnit::Weeks).is_err());
    }

    #[test]
    fn test_project_dates_for_diamond() {
        let tasks = vec![
            Task::new(1, "A", 2.0, vec![]),
            Task::new(2, "B", 5.0, vec![1]),
            Task::new(3, "C", 1.0, vec![1]),
            Task::new(4, "D", 3.0, vec![2, 3]),
        ];
        let result = calculate_network(&tasks, &NetworkConfig::default()).unwrap();
        let start = date(2025, 3, 3);

        let dates = project_dates(&result, start, TimeUnit::Days).unwrap();
        let c = dates[&3];
        assert_eq!(c.earliest_start, date(2025, 3, 5));
        assert_eq!(c.earliest_finish, date(2025, 3, 6));
        assert_eq!(c.latest_start, date(2025, 3, 9));
        assert_eq!(c.latest_finish, date(2025, 3, 10));

        assert_eq!(
            project_end_date(&result, start, TimeUnit::Weeks),
            Ok(date(2025, 5, 12))
        );
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(TimeUnit::default(), TimeUnit::Weeks);
        assert_eq!(TimeUnit::Weeks.label(), "weeks");
        assert_eq!(TimeUnit::Days.days_per_unit(), 1.0);
    }
}
