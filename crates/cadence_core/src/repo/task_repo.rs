//! Task repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `tasks` storage.
//! - Implement the window-overlap fetch used by calendar and report views.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths enforce the task-internal date ordering before SQL
//!   mutations; the cross-entity project bound is checked by the service
//!   layer, which also holds the project record.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Dates are stored as `YYYY-MM-DD` text, so lexicographic SQL
//!   comparison matches calendar order.

use crate::db::DbError;
use crate::model::task::{Task, TaskId};
use crate::policy::interval::DateViolation;
use crate::policy::window::DateWindow;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    id,
    project_id,
    name,
    start_date,
    end_date,
    completed
FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Dates(DateViolation),
    Db(DbError),
    NotFound(Uuid),
    InvalidData(String),
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dates(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl std::error::Error for RepoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dates(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DateViolation> for RepoError {
    fn from(value: DateViolation) -> Self {
        Self::Dates(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for task CRUD and window queries.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self, project_id: Uuid) -> RepoResult<Vec<Task>>;
    /// Returns the project's tasks whose interval overlaps the window.
    ///
    /// Open-ended tasks overlap every window from their start day onward.
    fn fetch_overlapping(&self, project_id: Uuid, window: &DateWindow) -> RepoResult<Vec<Task>>;
    fn set_completed(&self, id: TaskId, completed: bool) -> RepoResult<()>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        validate_task_dates(task)?;

        self.conn.execute(
            "INSERT INTO tasks (id, project_id, name, start_date, end_date, completed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                task.id.to_string(),
                task.project_id.to_string(),
                task.name.as_str(),
                date_to_db(task.start_date),
                task.end_date.map(date_to_db),
                bool_to_int(task.completed),
            ],
        )?;

        Ok(task.id)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        validate_task_dates(task)?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                project_id = ?1,
                name = ?2,
                start_date = ?3,
                end_date = ?4,
                completed = ?5
             WHERE id = ?6;",
            params![
                task.project_id.to_string(),
                task.name.as_str(),
                date_to_db(task.start_date),
                task.end_date.map(date_to_db),
                bool_to_int(task.completed),
                task.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }

        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self, project_id: Uuid) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE project_id = ?1
             ORDER BY start_date ASC, id ASC;"
        ))?;

        let mut rows = stmt.query([project_id.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn fetch_overlapping(&self, project_id: Uuid, window: &DateWindow) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE project_id = ?1
               AND start_date <= ?3
               AND (end_date IS NULL OR end_date >= ?2)
             ORDER BY start_date ASC, id ASC;"
        ))?;

        let mut rows = stmt.query(params![
            project_id.to_string(),
            date_to_db(window.start),
            date_to_db(window.end),
        ])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn set_completed(&self, id: TaskId, completed: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET completed = ?1 WHERE id = ?2;",
            params![bool_to_int(completed), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn validate_task_dates(task: &Task) -> Result<(), DateViolation> {
    if let Some(end) = task.end_date {
        if end < task.start_date {
            return Err(DateViolation::EndBeforeStart {
                task_start: task.start_date,
                task_end: end,
            });
        }
    }
    Ok(())
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id = parse_uuid_column(row, "id", "tasks.id")?;
    let project_id = parse_uuid_column(row, "project_id", "tasks.project_id")?;
    let start_date = parse_date_column(row, "start_date", "tasks.start_date")?;
    let end_date = parse_opt_date_column(row, "end_date", "tasks.end_date")?;
    let completed = parse_bool_column(row, "completed", "tasks.completed")?;

    let mut task = Task::with_id(id, project_id, row.get::<_, String>("name")?, start_date, end_date);
    task.completed = completed;
    Ok(task)
}

pub(crate) fn date_to_db(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn parse_db_date(value: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| RepoError::InvalidData(format!("invalid date value `{value}` in {column}")))
}

pub(crate) fn parse_uuid_column(row: &Row<'_>, index: &str, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(index)?;
    Uuid::parse_str(&text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{text}` in {column}")))
}

pub(crate) fn parse_date_column(row: &Row<'_>, index: &str, column: &str) -> RepoResult<NaiveDate> {
    let text: String = row.get(index)?;
    parse_db_date(&text, column)
}

pub(crate) fn parse_opt_date_column(
    row: &Row<'_>,
    index: &str,
    column: &str,
) -> RepoResult<Option<NaiveDate>> {
    match row.get::<_, Option<String>>(index)? {
        Some(text) => Ok(Some(parse_db_date(&text, column)?)),
        None => Ok(None),
    }
}

pub(crate) fn parse_bool_column(row: &Row<'_>, index: &str, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(index)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
