//! PostgreSQL-backed `TaskRepository` implementation using Diesel.

use std::time::Duration;

use async_trait::async_trait;
use diesel::dsl::{exists, sql};
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Timestamptz};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{
    RepositoryError, TASK_OPEN_CONSTRAINT, TASK_SUBJECT, TaskRepository, USER_SUBJECT,
};
use crate::domain::{ActivityWindow, NewTask, Task, TaskId, UserId};

use super::diesel_error_mapping::{
    DEFAULT_QUERY_TIMEOUT, Target, map_diesel_error, map_pool_error, with_timeout,
};
use super::models::{NewTaskRow, TaskRow};
use super::pool::DbPool;
use super::schema::tasks;

/// Diesel-backed implementation of the [`TaskRepository`] port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
    query_timeout: Duration,
}

impl DieselTaskRepository {
    /// Create a repository using the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Bound every call by `timeout`.
    #[must_use]
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn create(&self, task: &NewTask) -> Result<Task, RepositoryError> {
        const OP: &str = "create_task";
        let owner = Target::new(USER_SUBJECT, task.user_id.get());
        with_timeout(OP, self.query_timeout, async {
            let mut conn = self.pool.get().await.map_err(|err| map_pool_error(OP, err))?;
            diesel::insert_into(tasks::table)
                .values(NewTaskRow::from(task))
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(&mut conn)
                .await
                .map(Task::from)
                .map_err(|err| map_diesel_error(OP, Some(owner), err))
        })
        .await
    }

    async fn finish(&self, id: TaskId) -> Result<Task, RepositoryError> {
        const OP: &str = "finish_task";
        with_timeout(OP, self.query_timeout, async {
            let mut conn = self.pool.get().await.map_err(|err| map_pool_error(OP, err))?;
            let finished = diesel::update(
                tasks::table
                    .find(id.get())
                    .filter(tasks::end_time.is_null()),
            )
            .set(tasks::end_time.eq(sql::<Nullable<Timestamptz>>("CURRENT_TIMESTAMP")))
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(OP, None, err))?;

            if let Some(row) = finished {
                return Ok(Task::from(row));
            }

            // Nothing matched: either the task is unknown or already finished.
            let known = diesel::select(exists(tasks::table.find(id.get())))
                .get_result::<bool>(&mut conn)
                .await
                .map_err(|err| map_diesel_error(OP, None, err))?;
            debug!(operation = OP, task_id = id.get(), known, "task not finished");
            if known {
                Err(RepositoryError::conflict(TASK_OPEN_CONSTRAINT))
            } else {
                Err(Target::new(TASK_SUBJECT, id.get()).not_found())
            }
        })
        .await
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        window: &ActivityWindow,
    ) -> Result<Vec<Task>, RepositoryError> {
        const OP: &str = "list_user_tasks";
        let mut query = tasks::table
            .filter(tasks::user_id.eq(user_id.get()))
            .select(TaskRow::as_select())
            .order(tasks::task_id.asc())
            .into_boxed();
        if let Some(from) = window.from() {
            query = query.filter(tasks::start_time.ge(from));
        }
        if let Some(to) = window.to() {
            query = query.filter(tasks::start_time.le(to));
        }
        with_timeout(OP, self.query_timeout, async {
            let mut conn = self.pool.get().await.map_err(|err| map_pool_error(OP, err))?;
            query
                .load::<TaskRow>(&mut conn)
                .await
                .map(|rows| rows.into_iter().map(Task::from).collect())
                .map_err(|err| map_diesel_error(OP, None, err))
        })
        .await
    }
}
