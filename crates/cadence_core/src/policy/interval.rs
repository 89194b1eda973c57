//! Date-interval predicates and task/project range validation.
//!
//! # Responsibility
//! - Decide whether a reference day falls inside a task interval.
//! - Validate a task's date range against its owning project.
//!
//! # Invariants
//! - An open-ended interval (`end == None`) matches only its start day;
//!   the calendar day view treats unbounded tasks as single-day entries.
//! - Validation checks run in a fixed order and the first failing check
//!   is reported.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A task/project date-range violation.
///
/// All variants are client-visible validation failures, not infrastructure
/// errors; services surface them unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateViolation {
    /// The task starts before its project starts.
    StartBeforeProjectStart {
        task_start: NaiveDate,
        project_start: NaiveDate,
    },
    /// The task ends after its bounded project ends.
    EndAfterProjectEnd {
        task_end: NaiveDate,
        project_end: NaiveDate,
    },
    /// The task ends before it starts.
    EndBeforeStart {
        task_start: NaiveDate,
        task_end: NaiveDate,
    },
}

impl Display for DateViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StartBeforeProjectStart {
                task_start,
                project_start,
            } => write!(
                f,
                "task start {task_start} is before project start {project_start}"
            ),
            Self::EndAfterProjectEnd {
                task_end,
                project_end,
            } => write!(f, "task end {task_end} is after project end {project_end}"),
            Self::EndBeforeStart {
                task_start,
                task_end,
            } => write!(f, "task end {task_end} is before task start {task_start}"),
        }
    }
}

impl Error for DateViolation {}

/// Returns whether `reference` falls inside `[start, end]`.
///
/// With `end == None` the interval matches only `reference == start`.
pub fn is_within_range(reference: NaiveDate, start: NaiveDate, end: Option<NaiveDate>) -> bool {
    match end {
        None => reference == start,
        Some(end) => start <= reference && reference <= end,
    }
}

/// Validates a task date range against its owning project range.
///
/// Check order is fixed: project-start bound first, then project-end bound
/// (only when both ends are present), then task-internal ordering. The
/// first violated check is returned.
pub fn validate_task_against_project(
    task_start: NaiveDate,
    task_end: Option<NaiveDate>,
    project_start: NaiveDate,
    project_end: Option<NaiveDate>,
) -> Result<(), DateViolation> {
    if task_start < project_start {
        return Err(DateViolation::StartBeforeProjectStart {
            task_start,
            project_start,
        });
    }

    if let Some(task_end) = task_end {
        if let Some(project_end) = project_end {
            if task_end > project_end {
                return Err(DateViolation::EndAfterProjectEnd {
                    task_end,
                    project_end,
                });
            }
        }

        if task_end < task_start {
            return Err(DateViolation::EndBeforeStart {
                task_start,
                task_end,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{is_within_range, validate_task_against_project, DateViolation};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn bounded_interval_matches_inclusive_edges() {
        let start = day(2026, 3, 10);
        let end = Some(day(2026, 3, 12));

        assert!(!is_within_range(day(2026, 3, 9), start, end));
        assert!(is_within_range(day(2026, 3, 10), start, end));
        assert!(is_within_range(day(2026, 3, 12), start, end));
        assert!(!is_within_range(day(2026, 3, 13), start, end));
    }

    #[test]
    fn open_ended_interval_matches_only_its_start_day() {
        let start = day(2026, 3, 10);

        assert!(is_within_range(start, start, None));
        assert!(!is_within_range(day(2026, 3, 11), start, None));
        assert!(!is_within_range(day(2026, 3, 9), start, None));
    }

    #[test]
    fn task_inside_project_range_is_valid() {
        let result = validate_task_against_project(
            day(2026, 1, 10),
            Some(day(2026, 1, 20)),
            day(2026, 1, 1),
            Some(day(2026, 1, 31)),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn open_ended_task_in_bounded_project_is_valid() {
        let result = validate_task_against_project(
            day(2026, 1, 10),
            None,
            day(2026, 1, 1),
            Some(day(2026, 1, 31)),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn task_starting_before_project_is_rejected() {
        let result = validate_task_against_project(
            day(2025, 12, 31),
            Some(day(2026, 1, 5)),
            day(2026, 1, 1),
            None,
        );
        assert_eq!(
            result,
            Err(DateViolation::StartBeforeProjectStart {
                task_start: day(2025, 12, 31),
                project_start: day(2026, 1, 1),
            })
        );
    }

    #[test]
    fn task_ending_after_bounded_project_is_rejected() {
        let result = validate_task_against_project(
            day(2026, 1, 10),
            Some(day(2026, 2, 5)),
            day(2026, 1, 1),
            Some(day(2026, 1, 31)),
        );
        assert_eq!(
            result,
            Err(DateViolation::EndAfterProjectEnd {
                task_end: day(2026, 2, 5),
                project_end: day(2026, 1, 31),
            })
        );
    }

    #[test]
    fn reversed_task_range_is_rejected() {
        let result = validate_task_against_project(
            day(2026, 1, 10),
            Some(day(2026, 1, 5)),
            day(2026, 1, 1),
            None,
        );
        assert_eq!(
            result,
            Err(DateViolation::EndBeforeStart {
                task_start: day(2026, 1, 10),
                task_end: day(2026, 1, 5),
            })
        );
    }

    #[test]
    fn start_check_wins_over_later_checks() {
        // Violates both the project-start bound and internal ordering; the
        // first check in the fixed order is reported.
        let result = validate_task_against_project(
            day(2025, 12, 31),
            Some(day(2025, 12, 1)),
            day(2026, 1, 1),
            None,
        );
        assert!(matches!(
            result,
            Err(DateViolation::StartBeforeProjectStart { .. })
        ));
    }

    #[test]
    fn project_end_check_wins_over_reversed_range() {
        // End is both past the project end and before the task start; the
        // project-end bound is checked first.
        let result = validate_task_against_project(
            day(2026, 1, 20),
            Some(day(2026, 1, 15)),
            day(2026, 1, 1),
            Some(day(2026, 1, 10)),
        );
        assert!(matches!(
            result,
            Err(DateViolation::EndAfterProjectEnd { .. })
        ));
    }
}
