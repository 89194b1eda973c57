//! Calendar and report read-side service.
//!
//! # Responsibility
//! - Fetch one window's candidate tasks through the repository and derive
//!   the day view, banded completion report and project progress.
//!
//! # Invariants
//! - The ±3-day calendar window is a constant of this service, not of the
//!   window aggregation policy.
//! - Derivations are pure; the only side effect is the repository fetch.

use crate::model::project::{Project, ProjectId};
use crate::model::task::{Task, TaskStatus};
use crate::policy::progress::{elapsed_progress, ProgressError};
use crate::policy::window::{daily_bands, daily_completion, tasks_on_date, DateWindow};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Radius of the calendar day view window, in days.
pub const DAY_VIEW_RADIUS_DAYS: i64 = 3;

/// One task entry of the calendar day view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayViewTask {
    /// The task shown on the reference day.
    pub task: Task,
    /// Display status relative to the reference day.
    pub status: TaskStatus,
}

/// Calendar screen payload for one reference day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    /// The day the view is centered on.
    pub reference: NaiveDate,
    /// The fetched window (`reference ± DAY_VIEW_RADIUS_DAYS`).
    pub window: DateWindow,
    /// Tasks active on the reference day.
    pub tasks: Vec<DayViewTask>,
    /// Day→completed map over the whole window.
    pub completion: BTreeMap<NaiveDate, bool>,
}

/// Read-side service deriving calendar/report views from task storage.
pub struct CalendarService<T: TaskRepository> {
    tasks: T,
}

impl<T: TaskRepository> CalendarService<T> {
    /// Creates a service using the provided repository implementation.
    pub fn new(tasks: T) -> Self {
        Self { tasks }
    }

    /// Builds the calendar view centered on `reference`.
    pub fn day_view(&self, project_id: ProjectId, reference: NaiveDate) -> RepoResult<DayView> {
        let window = DateWindow::around(reference, DAY_VIEW_RADIUS_DAYS);
        let in_range = self.tasks.fetch_overlapping(project_id, &window)?;

        let tasks = tasks_on_date(&in_range, reference)
            .into_iter()
            .map(|task| DayViewTask {
                status: task.status_on(reference),
                task: task.clone(),
            })
            .collect();

        Ok(DayView {
            reference,
            window,
            tasks,
            completion: daily_completion(&in_range, &window),
        })
    }

    /// Builds the banded day→band map for a report window.
    pub fn completion_report(
        &self,
        project_id: ProjectId,
        window: &DateWindow,
    ) -> RepoResult<BTreeMap<NaiveDate, u8>> {
        let in_range = self.tasks.fetch_overlapping(project_id, window)?;
        Ok(daily_bands(&in_range, window))
    }

    /// Computes the project's elapsed-time progress percentage.
    pub fn project_progress(
        &self,
        project: &Project,
        today: NaiveDate,
    ) -> Result<u8, ProgressError> {
        elapsed_progress(project.start_date, project.end_date, today)
    }
}
