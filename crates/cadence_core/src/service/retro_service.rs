//! Retrospective service and skill reconciliation.
//!
//! # Responsibility
//! - Compute the add/remove diff that transforms a retrospective's current
//!   skill associations into a requested set of (name, type) pairs.
//! - Resolve requested names via lookup-or-create against the skill store.
//! - Apply the diff through the store in one transaction.
//!
//! # Invariants
//! - Reconciliation is a one-shot computation over immutable snapshots;
//!   nothing here mutates the caller's inputs.
//! - A name requested as both soft and hard resolves to one skill with the
//!   hard tag winning.
//! - Names present in both the existing and requested sets are left
//!   untouched; a changed type for a surviving name is NOT applied.
//! - Concurrent reconciliations for the same retrospective must be
//!   serialized by the caller; this service performs no locking.

use crate::model::project::ProjectId;
use crate::model::retro::{Retrospective, RetrospectiveId};
use crate::model::skill::{Skill, SkillAssociation, SkillType};
use crate::repo::skill_repo::{NamedAssociation, SkillStore};
use crate::repo::task_repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use log::info;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Requested skill names for one retrospective, split by type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillRequest {
    /// Names to attach as soft skills.
    pub soft: Vec<String>,
    /// Names to attach as hard skills.
    pub hard: Vec<String>,
}

impl SkillRequest {
    /// Collapses the two lists into a name→type map.
    ///
    /// The soft list is applied first, so a name in both lists ends up
    /// tagged hard.
    pub fn requested_types(&self) -> BTreeMap<String, SkillType> {
        let mut requested = BTreeMap::new();
        for name in &self.soft {
            requested.insert(name.clone(), SkillType::Soft);
        }
        for name in &self.hard {
            requested.insert(name.clone(), SkillType::Hard);
        }
        requested
    }
}

/// Result of one reconciliation: the associations to persist and drop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillDiff {
    /// New associations to insert.
    pub to_add: Vec<SkillAssociation>,
    /// Existing associations to delete.
    pub to_remove: Vec<NamedAssociation>,
}

impl SkillDiff {
    /// Returns whether applying this diff would change nothing.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Computes the add/remove diff for one retrospective.
///
/// Resolves every requested name through the store (one batch lookup, one
/// create per missing name) and diffs the requested name set against the
/// existing association snapshot. The caller persists the result.
pub fn reconcile_skills<S: SkillStore>(
    store: &S,
    retrospective_id: RetrospectiveId,
    existing: &[NamedAssociation],
    request: &SkillRequest,
) -> RepoResult<SkillDiff> {
    let requested = request.requested_types();
    let resolved = resolve_requested_skills(store, &requested)?;

    let existing_names: BTreeSet<&str> = existing
        .iter()
        .map(|entry| entry.skill_name.as_str())
        .collect();

    let to_remove: Vec<NamedAssociation> = existing
        .iter()
        .filter(|entry| !requested.contains_key(entry.skill_name.as_str()))
        .cloned()
        .collect();

    let mut to_add = Vec::new();
    for (name, skill_type) in &requested {
        if existing_names.contains(name.as_str()) {
            continue;
        }
        let skill = resolved
            .get(name)
            .ok_or_else(|| RepoError::InvalidData(format!("skill `{name}` was not resolved")))?;
        to_add.push(SkillAssociation::new(
            retrospective_id,
            skill.id,
            *skill_type,
        ));
    }

    Ok(SkillDiff { to_add, to_remove })
}

// Lookup-or-create for every requested name. The batch fetch runs once;
// each name it misses is created individually.
fn resolve_requested_skills<S: SkillStore>(
    store: &S,
    requested: &BTreeMap<String, SkillType>,
) -> RepoResult<BTreeMap<String, Skill>> {
    let names: Vec<String> = requested.keys().cloned().collect();
    let mut resolved: BTreeMap<String, Skill> = store
        .fetch_skills_by_names(&names)?
        .into_iter()
        .map(|skill| (skill.name.clone(), skill))
        .collect();

    for name in requested.keys() {
        if !resolved.contains_key(name) {
            let skill = store.create_skill(name)?;
            resolved.insert(name.clone(), skill);
        }
    }

    Ok(resolved)
}

/// Failure in a retrospective use-case.
#[derive(Debug)]
pub enum RetroServiceError {
    /// The retrospective does not exist.
    RetrospectiveNotFound(RetrospectiveId),
    /// Storage-level failure.
    Repo(RepoError),
}

impl Display for RetroServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RetrospectiveNotFound(id) => write!(f, "retrospective not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RetroServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RetrospectiveNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for RetroServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service for retrospectives and their skill links.
pub struct RetroService<S: SkillStore> {
    store: S,
}

impl<S: SkillStore> RetroService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a retrospective entry for a project.
    pub fn create_retrospective(
        &self,
        project_id: ProjectId,
        written_on: NaiveDate,
        body: impl Into<String>,
    ) -> Result<Retrospective, RetroServiceError> {
        let retro = Retrospective::new(project_id, written_on, body);
        self.store.create_retrospective(&retro)?;
        Ok(retro)
    }

    /// Gets one retrospective by stable ID.
    pub fn get_retrospective(
        &self,
        id: RetrospectiveId,
    ) -> Result<Option<Retrospective>, RetroServiceError> {
        Ok(self.store.get_retrospective(id)?)
    }

    /// Lists the retrospective's current skill associations.
    pub fn skills(
        &self,
        retrospective_id: RetrospectiveId,
    ) -> Result<Vec<NamedAssociation>, RetroServiceError> {
        Ok(self.store.fetch_associations(retrospective_id)?)
    }

    /// Reconciles the retrospective's skills against a request and persists
    /// the resulting diff in one store transaction.
    ///
    /// Returns the applied diff. Re-running the same request yields an
    /// empty diff.
    pub fn update_skills(
        &mut self,
        retrospective_id: RetrospectiveId,
        request: &SkillRequest,
    ) -> Result<SkillDiff, RetroServiceError> {
        self.store
            .get_retrospective(retrospective_id)?
            .ok_or(RetroServiceError::RetrospectiveNotFound(retrospective_id))?;

        let existing = self.store.fetch_associations(retrospective_id)?;
        let diff = reconcile_skills(&self.store, retrospective_id, &existing, request)?;

        if !diff.is_empty() {
            let remove_ids: Vec<_> = diff
                .to_remove
                .iter()
                .map(|entry| entry.association.id)
                .collect();
            self.store.apply_association_diff(&diff.to_add, &remove_ids)?;
        }

        info!(
            "event=retro_skills_reconciled module=service retrospective_id={retrospective_id} added={} removed={}",
            diff.to_add.len(),
            diff.to_remove.len()
        );

        Ok(diff)
    }
}

#[cfg(test)]
mod tests {
    use super::SkillRequest;
    use crate::model::skill::SkillType;

    #[test]
    fn hard_list_wins_over_soft_on_duplicate_names() {
        let request = SkillRequest {
            soft: vec!["Java".to_string(), "Pairing".to_string()],
            hard: vec!["Java".to_string()],
        };

        let requested = request.requested_types();
        assert_eq!(requested.len(), 2);
        assert_eq!(requested.get("Java"), Some(&SkillType::Hard));
        assert_eq!(requested.get("Pairing"), Some(&SkillType::Soft));
    }
}
