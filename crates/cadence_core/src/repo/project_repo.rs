//! Project repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `projects` storage.
//!
//! # Invariants
//! - Deleting a project cascades to its tasks and retrospectives at the
//!   schema level.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::model::project::{Project, ProjectId};
use crate::repo::task_repo::{
    date_to_db, parse_opt_date_column, parse_date_column, parse_uuid_column, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    name,
    start_date,
    end_date
FROM projects";

/// Repository interface for project CRUD operations.
pub trait ProjectRepository {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId>;
    fn update_project(&self, project: &Project) -> RepoResult<()>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    fn delete_project(&self, id: ProjectId) -> RepoResult<()>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId> {
        self.conn.execute(
            "INSERT INTO projects (id, name, start_date, end_date)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                project.id.to_string(),
                project.name.as_str(),
                date_to_db(project.start_date),
                project.end_date.map(date_to_db),
            ],
        )?;

        Ok(project.id)
    }

    fn update_project(&self, project: &Project) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE projects
             SET name = ?1, start_date = ?2, end_date = ?3
             WHERE id = ?4;",
            params![
                project.name.as_str(),
                date_to_db(project.start_date),
                project.end_date.map(date_to_db),
                project.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(project.id));
        }

        Ok(())
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }

        Ok(None)
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY start_date ASC, id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let id = parse_uuid_column(row, "id", "projects.id")?;
    let start_date = parse_date_column(row, "start_date", "projects.start_date")?;
    let end_date = parse_opt_date_column(row, "end_date", "projects.end_date")?;

    Ok(Project::with_id(
        id,
        row.get::<_, String>("name")?,
        start_date,
        end_date,
    ))
}
