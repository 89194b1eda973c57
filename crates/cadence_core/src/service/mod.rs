//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep callers decoupled from storage details.
//!
//! # Invariants
//! - Cross-entity date validation happens here, before any repository write.
//! - Transaction boundaries live in the repository layer; services compose
//!   reads and single-transaction writes.

pub mod calendar_service;
pub mod retro_service;
pub mod task_service;
