//! Project domain model.
//!
//! # Responsibility
//! - Define the project record that owns tasks and retrospectives.
//!
//! # Invariants
//! - `id` is stable and never reused for another project.
//! - `end_date == None` means the project runs open-ended.
//! - Tasks inside the project must satisfy `policy::interval` against
//!   this record's date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a project.
pub type ProjectId = Uuid;

/// A dated container for tasks and retrospectives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable global ID.
    pub id: ProjectId,
    /// Short human-readable title.
    pub name: String,
    /// First day of the project.
    pub start_date: NaiveDate,
    /// Last day of the project; `None` means open-ended.
    pub end_date: Option<NaiveDate>,
}

impl Project {
    /// Creates a new project with a generated stable ID.
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: Option<NaiveDate>) -> Self {
        Self::with_id(Uuid::new_v4(), name, start_date, end_date)
    }

    /// Creates a project with a caller-provided stable ID.
    ///
    /// Used by storage read paths where identity already exists.
    pub fn with_id(
        id: ProjectId,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start_date,
            end_date,
        }
    }

    /// Returns whether the project has no scheduled end day.
    pub fn is_open_ended(&self) -> bool {
        self.end_date.is_none()
    }
}
