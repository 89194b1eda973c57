//! Skill/retrospective store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide lookup-or-create access to the shared `skills` table.
//! - Read and batch-write `retrospective_skills` association rows.
//! - Own retrospective CRUD.
//!
//! # Invariants
//! - `skills.name` uniqueness is enforced by the schema; `create_skill`
//!   resolves an insert conflict by returning the now-existing row.
//! - `apply_association_diff` applies removals and additions in a single
//!   transaction.
//! - Association removal never deletes the referenced skill row.

use crate::model::retro::{Retrospective, RetrospectiveId};
use crate::model::skill::{AssociationId, Skill, SkillAssociation, SkillType};
use crate::repo::task_repo::{date_to_db, parse_date_column, parse_uuid_column, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};
use uuid::Uuid;

/// An association row joined with its skill's name.
///
/// Read model for the reconciliation flow, which diffs by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedAssociation {
    /// The persisted association record.
    pub association: SkillAssociation,
    /// Name of the referenced skill.
    pub skill_name: String,
}

/// Store interface for skills, associations and retrospectives.
pub trait SkillStore {
    fn create_retrospective(&self, retro: &Retrospective) -> RepoResult<RetrospectiveId>;
    fn get_retrospective(&self, id: RetrospectiveId) -> RepoResult<Option<Retrospective>>;
    /// Fetches every skill whose name matches one of `names` in one query.
    fn fetch_skills_by_names(&self, names: &[String]) -> RepoResult<Vec<Skill>>;
    /// Looks up or creates one skill by name.
    ///
    /// A uniqueness conflict means another writer created the name first;
    /// the existing row is returned instead of an error.
    fn create_skill(&self, name: &str) -> RepoResult<Skill>;
    /// Fetches the retrospective's associations joined with skill names.
    fn fetch_associations(&self, retrospective_id: RetrospectiveId)
        -> RepoResult<Vec<NamedAssociation>>;
    /// Applies a reconciliation diff in one transaction.
    fn apply_association_diff(
        &mut self,
        add: &[SkillAssociation],
        remove: &[AssociationId],
    ) -> RepoResult<()>;
}

/// SQLite-backed skill/retrospective store.
pub struct SqliteSkillStore<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteSkillStore<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl SkillStore for SqliteSkillStore<'_> {
    fn create_retrospective(&self, retro: &Retrospective) -> RepoResult<RetrospectiveId> {
        self.conn.execute(
            "INSERT INTO retrospectives (id, project_id, written_on, body)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                retro.id.to_string(),
                retro.project_id.to_string(),
                date_to_db(retro.written_on),
                retro.body.as_str(),
            ],
        )?;

        Ok(retro.id)
    }

    fn get_retrospective(&self, id: RetrospectiveId) -> RepoResult<Option<Retrospective>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, project_id, written_on, body
             FROM retrospectives
             WHERE id = ?1;",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_retro_row(row)?));
        }

        Ok(None)
    }

    fn fetch_skills_by_names(&self, names: &[String]) -> RepoResult<Vec<Skill>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; names.len()].join(", ");
        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, name FROM skills WHERE name IN ({placeholders});"
        ))?;

        let bind_values: Vec<Value> = names
            .iter()
            .map(|name| Value::Text(name.clone()))
            .collect();
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut skills = Vec::new();
        while let Some(row) = rows.next()? {
            skills.push(parse_skill_row(row)?);
        }

        Ok(skills)
    }

    fn create_skill(&self, name: &str) -> RepoResult<Skill> {
        self.conn.execute(
            "INSERT OR IGNORE INTO skills (id, name) VALUES (?1, ?2);",
            params![Uuid::new_v4().to_string(), name],
        )?;

        // The insert may have lost a uniqueness race; read back whichever
        // row owns the name now.
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM skills WHERE name = ?1;")?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return parse_skill_row(row);
        }

        Err(RepoError::InvalidData(format!(
            "skill `{name}` missing immediately after insert"
        )))
    }

    fn fetch_associations(
        &self,
        retrospective_id: RetrospectiveId,
    ) -> RepoResult<Vec<NamedAssociation>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                rs.id,
                rs.retrospective_id,
                rs.skill_id,
                rs.skill_type,
                s.name
             FROM retrospective_skills rs
             INNER JOIN skills s ON s.id = rs.skill_id
             WHERE rs.retrospective_id = ?1
             ORDER BY s.name ASC;",
        )?;

        let mut rows = stmt.query([retrospective_id.to_string()])?;
        let mut associations = Vec::new();
        while let Some(row) = rows.next()? {
            let skill_type_text: String = row.get("skill_type")?;
            let skill_type = parse_skill_type(&skill_type_text).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid skill type `{skill_type_text}` in retrospective_skills.skill_type"
                ))
            })?;

            associations.push(NamedAssociation {
                association: SkillAssociation {
                    id: parse_uuid_column(row, "id", "retrospective_skills.id")?,
                    retrospective_id: parse_uuid_column(
                        row,
                        "retrospective_id",
                        "retrospective_skills.retrospective_id",
                    )?,
                    skill_id: parse_uuid_column(row, "skill_id", "retrospective_skills.skill_id")?,
                    skill_type,
                },
                skill_name: row.get("name")?,
            });
        }

        Ok(associations)
    }

    fn apply_association_diff(
        &mut self,
        add: &[SkillAssociation],
        remove: &[AssociationId],
    ) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        for association_id in remove {
            tx.execute(
                "DELETE FROM retrospective_skills WHERE id = ?1;",
                [association_id.to_string()],
            )?;
        }

        for association in add {
            tx.execute(
                "INSERT INTO retrospective_skills (id, retrospective_id, skill_id, skill_type)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    association.id.to_string(),
                    association.retrospective_id.to_string(),
                    association.skill_id.to_string(),
                    skill_type_to_db(association.skill_type),
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}

fn parse_retro_row(row: &Row<'_>) -> RepoResult<Retrospective> {
    Ok(Retrospective {
        id: parse_uuid_column(row, "id", "retrospectives.id")?,
        project_id: parse_uuid_column(row, "project_id", "retrospectives.project_id")?,
        written_on: parse_date_column(row, "written_on", "retrospectives.written_on")?,
        body: row.get("body")?,
    })
}

fn parse_skill_row(row: &Row<'_>) -> RepoResult<Skill> {
    Ok(Skill::with_id(
        parse_uuid_column(row, "id", "skills.id")?,
        row.get::<_, String>("name")?,
    ))
}

fn skill_type_to_db(skill_type: SkillType) -> &'static str {
    match skill_type {
        SkillType::Soft => "soft",
        SkillType::Hard => "hard",
    }
}

fn parse_skill_type(value: &str) -> Option<SkillType> {
    match value {
        "soft" => Some(SkillType::Soft),
        "hard" => Some(SkillType::Hard),
        _ => None,
    }
}
