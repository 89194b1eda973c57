//! Retrospective domain model.
//!
//! # Responsibility
//! - Define the dated retrospective entry that skill associations attach to.
//!
//! # Invariants
//! - `id` is stable and never reused for another retrospective.
//! - Skill links are managed exclusively through the reconciliation flow
//!   in `service::retro_service`.

use crate::model::project::ProjectId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a retrospective.
pub type RetrospectiveId = Uuid;

/// A written retrospective entry for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retrospective {
    /// Stable global ID.
    pub id: RetrospectiveId,
    /// Project the entry belongs to.
    pub project_id: ProjectId,
    /// Day the entry was written for.
    pub written_on: NaiveDate,
    /// Free-form entry text.
    pub body: String,
}

impl Retrospective {
    /// Creates a new retrospective with a generated stable ID.
    pub fn new(project_id: ProjectId, written_on: NaiveDate, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            written_on,
            body: body.into(),
        }
    }
}
