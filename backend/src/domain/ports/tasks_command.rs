//! Driving port for task mutations.

use async_trait::async_trait;

use crate::domain::{Error, Task, TaskId, UserId};

/// Validated create-task payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub user_id: UserId,
    pub task_name: String,
}

/// Use-cases that change tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TasksCommand: Send + Sync {
    /// Start a task for an existing user.
    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, Error>;

    /// Finish an open task.
    async fn finish_task(&self, task_id: TaskId) -> Result<Task, Error>;
}
