//! Skill and skill-association domain model.
//!
//! # Responsibility
//! - Define the named skill record shared across all retrospectives.
//! - Define the association record linking a skill to one retrospective.
//!
//! # Invariants
//! - Skill `name` is unique system-wide; skills are created lazily and
//!   never deleted by core logic.
//! - A retrospective holds at most one association per skill name.

use crate::model::retro::RetrospectiveId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a skill.
pub type SkillId = Uuid;

/// Stable identifier for a skill association.
pub type AssociationId = Uuid;

/// Category of a skill as attached to one retrospective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    /// Interpersonal/process skill.
    Soft,
    /// Technical skill.
    Hard,
}

/// A named skill shared across retrospectives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Stable global ID.
    pub id: SkillId,
    /// Unique display name.
    pub name: String,
}

impl Skill {
    /// Creates a new skill with a generated stable ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a skill with a caller-provided stable ID.
    pub fn with_id(id: SkillId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Link between one retrospective and one skill, tagged with a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillAssociation {
    /// Stable global ID.
    pub id: AssociationId,
    /// Retrospective the skill is attached to.
    pub retrospective_id: RetrospectiveId,
    /// Skill being attached.
    pub skill_id: SkillId,
    /// Soft/hard tag chosen when the association was created.
    pub skill_type: SkillType,
}

impl SkillAssociation {
    /// Creates a new association with a generated stable ID.
    pub fn new(
        retrospective_id: RetrospectiveId,
        skill_id: SkillId,
        skill_type: SkillType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            retrospective_id,
            skill_id,
            skill_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Skill, SkillAssociation, SkillType};
    use uuid::Uuid;

    #[test]
    fn new_skill_generates_id() {
        let skill = Skill::new("Rust");

        assert!(!skill.id.is_nil());
        assert_eq!(skill.name, "Rust");
    }

    #[test]
    fn association_links_retrospective_and_skill() {
        let retro_id = Uuid::new_v4();
        let skill = Skill::new("Pairing");
        let link = SkillAssociation::new(retro_id, skill.id, SkillType::Soft);

        assert_eq!(link.retrospective_id, retro_id);
        assert_eq!(link.skill_id, skill.id);
        assert_eq!(link.skill_type, SkillType::Soft);
    }
}
