//! Elapsed-time project progress.
//!
//! # Responsibility
//! - Compute the progress percentage shown on a project card from its
//!   date range and a caller-supplied reference day.
//!
//! # Invariants
//! - The result is always in `[0, 100]`.
//! - Open-ended projects report the raw elapsed day count capped at 100,
//!   not a true ratio.
//! - A bounded zero-length project reached on its single day is reported
//!   as a typed error instead of dividing by zero.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure computing elapsed-time progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressError {
    /// Bounded project with `start == end`, evaluated on that exact day.
    ///
    /// The elapsed/total ratio is undefined for a zero-day span; callers
    /// decide how to render such projects.
    ZeroLengthProject { start: NaiveDate },
}

impl Display for ProgressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroLengthProject { start } => {
                write!(f, "project starting and ending on {start} has a zero-day span")
            }
        }
    }
}

impl Error for ProgressError {}

/// Computes the elapsed-time progress percentage for a project.
///
/// - Before the start day the project is at `0`.
/// - Open-ended projects report `min(elapsed_days, 100)`.
/// - Past the end day the project is at `100`.
/// - Otherwise the result is `floor(elapsed / total * 100)`.
///
/// # Errors
/// - [`ProgressError::ZeroLengthProject`] for a bounded `start == end`
///   project evaluated on that day.
pub fn elapsed_progress(
    start: NaiveDate,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<u8, ProgressError> {
    if today < start {
        return Ok(0);
    }

    let elapsed_days = (today - start).num_days();

    let Some(end) = end else {
        return Ok(elapsed_days.min(100) as u8);
    };

    if today > end {
        return Ok(100);
    }

    let total_days = (end - start).num_days();
    if total_days == 0 {
        return Err(ProgressError::ZeroLengthProject { start });
    }

    Ok((elapsed_days * 100 / total_days) as u8)
}

#[cfg(test)]
mod tests {
    use super::{elapsed_progress, ProgressError};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn before_start_is_zero() {
        let result = elapsed_progress(day(2026, 2, 1), Some(day(2026, 3, 1)), day(2026, 1, 31));
        assert_eq!(result, Ok(0));
    }

    #[test]
    fn past_end_is_full() {
        let result = elapsed_progress(day(2026, 2, 1), Some(day(2026, 3, 1)), day(2026, 3, 2));
        assert_eq!(result, Ok(100));
    }

    #[test]
    fn bounded_project_truncates_the_ratio() {
        // 2024 is a leap year; the range still spans 365 days and 152 of
        // them have elapsed by June 1st: floor(152 / 365 * 100) = 41.
        let result = elapsed_progress(day(2024, 1, 1), Some(day(2024, 12, 31)), day(2024, 6, 1));
        assert_eq!(result, Ok(41));
    }

    #[test]
    fn end_day_itself_is_not_past_end() {
        // 10-day span, evaluated on the last day: exactly 100.
        let result = elapsed_progress(day(2026, 2, 1), Some(day(2026, 2, 11)), day(2026, 2, 11));
        assert_eq!(result, Ok(100));
    }

    #[test]
    fn open_ended_project_counts_days_capped_at_100() {
        let start = day(2026, 1, 1);
        assert_eq!(elapsed_progress(start, None, day(2026, 1, 31)), Ok(30));
        assert_eq!(elapsed_progress(start, None, start + chrono::Duration::days(150)), Ok(100));
    }

    #[test]
    fn open_ended_project_on_start_day_is_zero() {
        let start = day(2026, 1, 1);
        assert_eq!(elapsed_progress(start, None, start), Ok(0));
    }

    #[test]
    fn zero_length_bounded_project_is_a_typed_error() {
        let start = day(2026, 5, 5);
        let result = elapsed_progress(start, Some(start), start);
        assert_eq!(result, Err(ProgressError::ZeroLengthProject { start }));
    }

    #[test]
    fn zero_length_project_after_its_day_is_full() {
        let start = day(2026, 5, 5);
        let result = elapsed_progress(start, Some(start), day(2026, 5, 6));
        assert_eq!(result, Ok(100));
    }
}
