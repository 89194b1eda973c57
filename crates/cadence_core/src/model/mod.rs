//! Domain model for projects, tasks, retrospectives and skills.
//!
//! # Responsibility
//! - Define the canonical records shared by policy and service layers.
//! - Keep cross-entity references as plain id fields.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - Records never embed other records; lookups go through repositories
//!   keyed by id.

pub mod project;
pub mod retro;
pub mod skill;
pub mod task;
