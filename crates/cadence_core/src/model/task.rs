//! Task domain model.
//!
//! # Responsibility
//! - Define the task record tracked inside a project date range.
//! - Derive the display status of a task relative to a reference day.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `end_date == None` means the task is open-ended.
//! - Date-range consistency against the owning project is enforced by
//!   `policy::interval` before any write.

use crate::model::project::ProjectId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Display status of a task relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// The task has started on or before the reference day.
    InProgress,
    /// The task starts after the reference day.
    Upcoming,
}

/// A dated unit of work owned by one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Short human-readable title.
    pub name: String,
    /// First day the task is scheduled on.
    pub start_date: NaiveDate,
    /// Last scheduled day; `None` means open-ended.
    pub end_date: Option<NaiveDate>,
    /// Whether the task has been marked done.
    pub completed: bool,
}

impl Task {
    /// Creates a new task with a generated stable ID.
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), project_id, name, start_date, end_date)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by storage read paths where identity already exists.
    pub fn with_id(
        id: TaskId,
        project_id: ProjectId,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            project_id,
            name: name.into(),
            start_date,
            end_date,
            completed: false,
        }
    }

    /// Returns whether the task has no scheduled end day.
    pub fn is_open_ended(&self) -> bool {
        self.end_date.is_none()
    }

    /// Classifies the task against a reference day.
    ///
    /// A task counts as in progress from its start day onward; completion
    /// does not change the classification.
    pub fn status_on(&self, reference: NaiveDate) -> TaskStatus {
        if self.start_date <= reference {
            TaskStatus::InProgress
        } else {
            TaskStatus::Upcoming
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskStatus};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn new_task_starts_incomplete() {
        let task = Task::new(Uuid::new_v4(), "write draft", day(2026, 3, 1), None);

        assert!(!task.id.is_nil());
        assert!(!task.completed);
        assert!(task.is_open_ended());
    }

    #[test]
    fn status_is_in_progress_from_start_day_onward() {
        let task = Task::new(
            Uuid::new_v4(),
            "review",
            day(2026, 3, 10),
            Some(day(2026, 3, 20)),
        );

        assert_eq!(task.status_on(day(2026, 3, 9)), TaskStatus::Upcoming);
        assert_eq!(task.status_on(day(2026, 3, 10)), TaskStatus::InProgress);
        assert_eq!(task.status_on(day(2026, 4, 1)), TaskStatus::InProgress);
    }
}
