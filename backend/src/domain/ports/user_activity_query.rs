//! Driving port for the per-user activity report.

use async_trait::async_trait;

use crate::domain::{ActivityWindow, Error, TaskActivity, UserId};

/// Use-case reporting how long a user's tasks have run.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserActivityQuery: Send + Sync {
    /// Tasks of `user_id` started inside `window`, longest running first.
    async fn user_activity(
        &self,
        user_id: UserId,
        window: ActivityWindow,
    ) -> Result<Vec<TaskActivity>, Error>;
}
