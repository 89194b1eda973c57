//! Discrete progress banding for report views.
//!
//! # Responsibility
//! - Map a raw completion ratio onto the six display bands
//!   `{0, 20, 40, 60, 80, 100}`.
//!
//! # Invariants
//! - A day with zero completed or zero total tasks always bands to `0`;
//!   the ratio is never computed for empty input.
//! - Band edges are inclusive on the upper bound (`30.0` still bands
//!   to `20`).

/// Maps a completion ratio in percent onto a display band.
///
/// Callers are expected to gate on positive counts via [`day_band`];
/// this function assumes the ratio was worth computing.
pub fn band(ratio_percent: f64) -> u8 {
    if ratio_percent <= 30.0 {
        20
    } else if ratio_percent <= 50.0 {
        40
    } else if ratio_percent <= 70.0 {
        60
    } else if ratio_percent <= 99.0 {
        80
    } else {
        100
    }
}

/// Computes `completed / total * 100` as a real ratio.
///
/// Returns `0.0` when either count is zero.
pub fn completion_ratio(completed: u32, total: u32) -> f64 {
    if completed == 0 || total == 0 {
        return 0.0;
    }
    f64::from(completed) / f64::from(total) * 100.0
}

/// Bands one day's completed-vs-total task counts.
///
/// Returns `0` unless both counts are positive.
pub fn day_band(completed: u32, total: u32) -> u8 {
    if completed == 0 || total == 0 {
        return 0;
    }
    band(completion_ratio(completed, total))
}
