//! Port for task persistence.

use async_trait::async_trait;

use crate::domain::{ActivityWindow, NewTask, Task, TaskId, UserId};

use super::RepositoryError;

/// Subject reported in [`RepositoryError::NotFound`] for tasks.
pub const TASK_SUBJECT: &str = "Task";

/// Constraint reported when finishing a task that is already finished.
pub const TASK_OPEN_CONSTRAINT: &str = "tasks_open";

/// Port for storing and reading tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert an open task stamped with the store's current time.
    ///
    /// An unknown owner yields [`RepositoryError::NotFound`] with subject
    /// [`super::USER_SUBJECT`].
    async fn create(&self, task: &NewTask) -> Result<Task, RepositoryError>;

    /// Stamp the finish time of an open task.
    ///
    /// Unknown ids yield [`RepositoryError::NotFound`]; finished tasks yield
    /// [`RepositoryError::Conflict`] with [`TASK_OPEN_CONSTRAINT`].
    async fn finish(&self, id: TaskId) -> Result<Task, RepositoryError>;

    /// Tasks owned by `user_id` that started inside `window`.
    async fn list_for_user(
        &self,
        user_id: UserId,
        window: &ActivityWindow,
    ) -> Result<Vec<Task>, RepositoryError>;
}
