//! Pure date/band/diff policies.
//!
//! # Responsibility
//! - Hold the deterministic business rules shared by all services.
//! - Keep every function free of storage and clock access; callers pass
//!   reference dates in.
//!
//! # Invariants
//! - No function in this module performs I/O or panics on well-formed input.
//! - Failures are typed values, never raised errors.

pub mod banding;
pub mod interval;
pub mod progress;
pub mod window;
