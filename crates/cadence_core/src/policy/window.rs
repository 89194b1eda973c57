//! Date-window aggregation over task lists.
//!
//! # Responsibility
//! - Define the inclusive date window used by calendar and report views.
//! - Derive per-day views from a caller-fetched task list: the tasks
//!   active on one day, a day-by-day completion map, and a banded
//!   completion map.
//!
//! # Invariants
//! - The window radius is caller-supplied; this module never hardcodes
//!   the calendar's ±3-day default.
//! - A day counts as completed when ANY task active that day is marked
//!   done, regardless of the other tasks' state.
//! - For the day-by-day maps an open-ended task is active from its start
//!   day onward; only the single-day view (`tasks_on_date`) collapses it
//!   to its start day.

use crate::model::task::Task;
use crate::policy::banding::day_band;
use crate::policy::interval::is_within_range;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// An inclusive `[start, end]` day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window, inclusive.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Creates a window from explicit bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Creates a window of `reference ± radius_days`.
    pub fn around(reference: NaiveDate, radius_days: i64) -> Self {
        let radius = Duration::days(radius_days);
        Self {
            start: reference - radius,
            end: reference + radius,
        }
    }

    /// Returns whether the window contains `date`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates every day of the window in order, bounds included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

/// Filters the tasks shown for a single calendar day.
///
/// Uses the single-day interval semantics of
/// [`is_within_range`]: an open-ended task appears only on its start day.
pub fn tasks_on_date(tasks: &[Task], reference: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| is_within_range(reference, task.start_date, task.end_date))
        .collect()
}

/// Builds the day→completed map for every day of the window.
///
/// A day is completed when at least one task active that day has
/// `completed == true` (logical OR across overlapping tasks).
pub fn daily_completion(tasks: &[Task], window: &DateWindow) -> BTreeMap<NaiveDate, bool> {
    window
        .days()
        .map(|day| {
            let done = tasks
                .iter()
                .any(|task| is_active_on(task, day) && task.completed);
            (day, done)
        })
        .collect()
}

/// Builds the day→band map for every day of the window.
///
/// Each day bands its completed-vs-active task counts; days with no
/// active or no completed tasks band to `0`.
pub fn daily_bands(tasks: &[Task], window: &DateWindow) -> BTreeMap<NaiveDate, u8> {
    window
        .days()
        .map(|day| {
            let mut total = 0u32;
            let mut completed = 0u32;
            for task in tasks {
                if is_active_on(task, day) {
                    total += 1;
                    if task.completed {
                        completed += 1;
                    }
                }
            }
            (day, day_band(completed, total))
        })
        .collect()
}

// Day-map activity predicate: open-ended tasks stay active from their
// start day onward.
fn is_active_on(task: &Task, day: NaiveDate) -> bool {
    day >= task.start_date && task.end_date.map_or(true, |end| day <= end)
}

#[cfg(test)]
mod tests {
    use super::{daily_bands, daily_completion, tasks_on_date, DateWindow};
    use crate::model::task::Task;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn task(start: NaiveDate, end: Option<NaiveDate>, completed: bool) -> Task {
        let mut task = Task::new(Uuid::new_v4(), "t", start, end);
        task.completed = completed;
        task
    }

    #[test]
    fn around_builds_inclusive_radius_window() {
        let window = DateWindow::around(day(2026, 3, 10), 3);

        assert_eq!(window.start, day(2026, 3, 7));
        assert_eq!(window.end, day(2026, 3, 13));
        assert_eq!(window.days().count(), 7);
    }

    #[test]
    fn days_iterates_bounds_inclusive_in_order() {
        let window = DateWindow::new(day(2026, 2, 27), day(2026, 3, 2));
        let days: Vec<_> = window.days().collect();

        assert_eq!(
            days,
            vec![
                day(2026, 2, 27),
                day(2026, 2, 28),
                day(2026, 3, 1),
                day(2026, 3, 2),
            ]
        );
    }

    #[test]
    fn tasks_on_date_uses_single_day_semantics_for_open_ended() {
        let reference = day(2026, 3, 10);
        let tasks = vec![
            task(reference, None, false),
            task(day(2026, 3, 9), None, false),
            task(day(2026, 3, 8), Some(day(2026, 3, 12)), false),
        ];

        let active = tasks_on_date(&tasks, reference);
        assert_eq!(active.len(), 2);
        assert!(active.iter().any(|t| t.id == tasks[0].id));
        assert!(active.iter().any(|t| t.id == tasks[2].id));
    }

    #[test]
    fn overlapping_tasks_or_into_a_completed_day() {
        let d = day(2026, 3, 10);
        let tasks = vec![
            task(d, Some(d), false),
            task(d - chrono::Duration::days(1), Some(d + chrono::Duration::days(1)), true),
        ];
        let window = DateWindow::new(d, d);

        let map = daily_completion(&tasks, &window);
        assert_eq!(map.get(&d), Some(&true));
    }

    #[test]
    fn days_without_completed_tasks_are_incomplete() {
        let window = DateWindow::new(day(2026, 3, 1), day(2026, 3, 3));
        let tasks = vec![task(day(2026, 3, 1), Some(day(2026, 3, 2)), false)];

        let map = daily_completion(&tasks, &window);
        assert_eq!(map.get(&day(2026, 3, 1)), Some(&false));
        assert_eq!(map.get(&day(2026, 3, 2)), Some(&false));
        assert_eq!(map.get(&day(2026, 3, 3)), Some(&false));
    }

    #[test]
    fn open_ended_tasks_stay_active_in_day_maps() {
        let start = day(2026, 3, 1);
        let window = DateWindow::new(start, day(2026, 3, 3));
        let tasks = vec![task(start, None, true)];

        let map = daily_completion(&tasks, &window);
        assert!(map.values().all(|done| *done));
    }

    #[test]
    fn daily_bands_follow_active_task_counts() {
        let window = DateWindow::new(day(2026, 3, 1), day(2026, 3, 2));
        let tasks = vec![
            task(day(2026, 3, 1), Some(day(2026, 3, 2)), true),
            task(day(2026, 3, 1), Some(day(2026, 3, 2)), false),
            task(day(2026, 3, 2), Some(day(2026, 3, 2)), false),
        ];

        let map = daily_bands(&tasks, &window);
        // March 1st: 1 of 2 active tasks done -> 50% -> band 40.
        assert_eq!(map.get(&day(2026, 3, 1)), Some(&40));
        // March 2nd: 1 of 3 active tasks done -> 33% -> band 40.
        assert_eq!(map.get(&day(2026, 3, 2)), Some(&40));
    }

    #[test]
    fn daily_bands_are_zero_for_empty_days() {
        let window = DateWindow::new(day(2026, 3, 1), day(2026, 3, 1));

        let map = daily_bands(&[], &window);
        assert_eq!(map.get(&day(2026, 3, 1)), Some(&0));
    }
}
