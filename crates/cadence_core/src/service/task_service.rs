//! Task use-case service.
//!
//! # Responsibility
//! - Validate task date ranges against the owning project before any write.
//! - Provide stable CRUD entry points for core callers.
//!
//! # Invariants
//! - No task write reaches the repository without passing
//!   `policy::interval::validate_task_against_project`.
//! - Service APIs never bypass repository persistence contracts.

use crate::model::project::ProjectId;
use crate::model::task::{Task, TaskId};
use crate::policy::interval::{validate_task_against_project, DateViolation};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::task_repo::{RepoError, TaskRepository};
use chrono::NaiveDate;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure in a task use-case.
#[derive(Debug)]
pub enum TaskServiceError {
    /// The task's dates violate its project's range.
    Dates(DateViolation),
    /// The owning project does not exist.
    ProjectNotFound(ProjectId),
    /// Storage-level failure.
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dates(err) => write!(f, "{err}"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dates(err) => Some(err),
            Self::ProjectNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<DateViolation> for TaskServiceError {
    fn from(value: DateViolation) -> Self {
        Self::Dates(value)
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service for task writes guarded by project date bounds.
pub struct TaskService<T: TaskRepository, P: ProjectRepository> {
    tasks: T,
    projects: P,
}

impl<T: TaskRepository, P: ProjectRepository> TaskService<T, P> {
    /// Creates a service using the provided repository implementations.
    pub fn new(tasks: T, projects: P) -> Self {
        Self { tasks, projects }
    }

    /// Creates a task after validating its dates against the project.
    pub fn create_task(
        &self,
        project_id: ProjectId,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<Task, TaskServiceError> {
        self.check_dates(project_id, start_date, end_date)?;

        let task = Task::new(project_id, name, start_date, end_date);
        self.tasks.create_task(&task)?;
        Ok(task)
    }

    /// Updates a task after re-validating its dates against the project.
    pub fn update_task(&self, task: &Task) -> Result<(), TaskServiceError> {
        self.check_dates(task.project_id, task.start_date, task.end_date)?;
        self.tasks.update_task(task)?;
        Ok(())
    }

    /// Marks a task completed or not.
    pub fn set_completed(&self, id: TaskId, completed: bool) -> Result<(), TaskServiceError> {
        self.tasks.set_completed(id, completed)?;
        Ok(())
    }

    /// Gets one task by stable ID.
    pub fn get_task(&self, id: TaskId) -> Result<Option<Task>, TaskServiceError> {
        Ok(self.tasks.get_task(id)?)
    }

    /// Lists a project's tasks ordered by start date.
    pub fn list_tasks(&self, project_id: ProjectId) -> Result<Vec<Task>, TaskServiceError> {
        Ok(self.tasks.list_tasks(project_id)?)
    }

    /// Deletes a task by stable ID.
    pub fn delete_task(&self, id: TaskId) -> Result<(), TaskServiceError> {
        self.tasks.delete_task(id)?;
        Ok(())
    }

    fn check_dates(
        &self,
        project_id: ProjectId,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<(), TaskServiceError> {
        let project = self
            .projects
            .get_project(project_id)?
            .ok_or(TaskServiceError::ProjectNotFound(project_id))?;

        if let Err(violation) =
            validate_task_against_project(start_date, end_date, project.start_date, project.end_date)
        {
            warn!(
                "event=task_dates_rejected module=service project_id={project_id} violation={violation}"
            );
            return Err(violation.into());
        }

        Ok(())
    }
}
