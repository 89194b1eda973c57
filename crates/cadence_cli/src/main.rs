//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `cadence_core` linkage,
//!   including the logging bootstrap.
//! - Keep stdout deterministic for quick local sanity checks.

use cadence_core::{core_version, default_log_level, init_logging, ping};

fn main() {
    let log_dir = std::env::temp_dir().join("cadence-logs");
    if let Err(err) = init_logging(default_log_level(), &log_dir) {
        eprintln!("cadence logging disabled: {err}");
    }

    println!("cadence_core ping={}", ping());
    println!("cadence_core version={}", core_version());
}
