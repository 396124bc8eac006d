//! Task use-cases and the per-user activity report.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    CreateTaskRequest, RepositoryError, TaskRepository, TasksCommand, UserActivityQuery,
};
use crate::domain::user_service::internal_failure;
use crate::domain::{
    ActivityWindow, Error, NewTask, Task, TaskActivity, TaskId, UserId, summarize_activity,
};

/// Task service implementing the task driving ports.
///
/// The clock supplies "now" for tasks that are still open when the activity
/// report is built.
#[derive(Clone)]
pub struct TaskService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TaskService<R> {
    /// Create a service reading time from `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> TasksCommand for TaskService<R>
where
    R: TaskRepository,
{
    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, Error> {
        let user_id = request.user_id;
        let task = NewTask {
            user_id,
            name: request.task_name,
        };
        self.repo.create(&task).await.map_err(|err| match err {
            RepositoryError::NotFound { .. } => {
                Error::not_found(format!("User with id={user_id} does not exist"))
            }
            other => internal_failure("create_task", &other),
        })
    }

    async fn finish_task(&self, task_id: TaskId) -> Result<Task, Error> {
        self.repo.finish(task_id).await.map_err(|err| match err {
            RepositoryError::NotFound { .. } => {
                Error::not_found(format!("Task not found. Task_id: {task_id}"))
            }
            RepositoryError::Conflict { .. } => {
                Error::conflict(format!("Task {task_id} is already finished"))
            }
            other @ RepositoryError::OperationFailure { .. } => {
                internal_failure("finish_task", &other)
            }
        })
    }
}

#[async_trait]
impl<R> UserActivityQuery for TaskService<R>
where
    R: TaskRepository,
{
    async fn user_activity(
        &self,
        user_id: UserId,
        window: ActivityWindow,
    ) -> Result<Vec<TaskActivity>, Error> {
        let tasks = self
            .repo
            .list_for_user(user_id, &window)
            .await
            .map_err(|err| internal_failure("user_activity", &err))?;
        Ok(summarize_activity(tasks, self.clock.utc()))
    }
}
