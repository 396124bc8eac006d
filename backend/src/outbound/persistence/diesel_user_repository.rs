//! PostgreSQL-backed `UserRepository` implementation using Diesel.

use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{RepositoryError, USER_SUBJECT, UserRepository};
use crate::domain::{NewUser, UpdateSpec, User, UserId};

use super::diesel_error_mapping::{
    DEFAULT_QUERY_TIMEOUT, Target, map_diesel_error, map_pool_error, with_timeout,
};
use super::models::{NewUserRow, UserPageRow, UserRow};
use super::pool::DbPool;
use super::schema::users;
use super::update_statement::render_update_statement;

/// Page of users and the total count in one statement, so both come from the
/// same snapshot. The lateral join keeps the count row when the page is empty.
const LIST_USERS_SQL: &str = "\
SELECT counted.total, page.user_id, page.passport_serie, page.passport_number, \
page.surname, page.name \
FROM (SELECT COUNT(*) AS total FROM users) AS counted \
LEFT JOIN LATERAL ( \
    SELECT user_id, passport_serie, passport_number, surname, name \
    FROM users ORDER BY user_id LIMIT $1 OFFSET $2 \
) AS page ON TRUE \
ORDER BY page.user_id";

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    query_timeout: Duration,
}

impl DieselUserRepository {
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

fn user_target(id: UserId) -> Target {
    Target::new(USER_SUBJECT, id.get())
}

fn page_bound(operation: &'static str, value: u64) -> Result<i64, RepositoryError> {
    i64::try_from(value).map_err(|_| {
        tracing::error!(operation, value, "page bound exceeds the store range");
        RepositoryError::operation_failure("page bound out of range")
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        const OP: &str = "create_user";
        with_timeout(OP, self.query_timeout, async {
            let mut conn = self.pool.get().await.map_err(|err| map_pool_error(OP, err))?;
            diesel::insert_into(users::table)
                .values(NewUserRow::from(user))
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(&mut conn)
                .await
                .map(User::from)
                .map_err(|err| map_diesel_error(OP, None, err))
        })
        .await
    }

    async fn update(&self, id: UserId, spec: &UpdateSpec) -> Result<User, RepositoryError> {
        const OP: &str = "update_user";
        let query = render_update_statement(spec, id).into_query();
        with_timeout(OP, self.query_timeout, async {
            let mut conn = self.pool.get().await.map_err(|err| map_pool_error(OP, err))?;
            query
                .get_result::<UserRow>(&mut conn)
                .await
                .map(User::from)
                .map_err(|err| map_diesel_error(OP, Some(user_target(id)), err))
        })
        .await
    }

    async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        const OP: &str = "delete_user";
        with_timeout(OP, self.query_timeout, async {
            let mut conn = self.pool.get().await.map_err(|err| map_pool_error(OP, err))?;
            let deleted = diesel::delete(users::table.find(id.get()))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(OP, None, err))?;
            if deleted == 0 {
                tracing::debug!(operation = OP, user_id = id.get(), "no user deleted");
                return Err(user_target(id).not_found());
            }
            Ok(())
        })
        .await
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<User>, RepositoryError> {
        const OP: &str = "list_users";
        let limit = page_bound(OP, u64::from(request.page_size()))?;
        let offset = page_bound(OP, request.offset())?;
        with_timeout(OP, self.query_timeout, async {
            let mut conn = self.pool.get().await.map_err(|err| map_pool_error(OP, err))?;
            let rows = diesel::sql_query(LIST_USERS_SQL)
                .bind::<BigInt, _>(limit)
                .bind::<BigInt, _>(offset)
                .load::<UserPageRow>(&mut conn)
                .await
                .map_err(|err| map_diesel_error(OP, None, err))?;
            let total = rows.as_slice().first().map_or(0, |row| row.total);
            let users = rows.into_iter().filter_map(UserPageRow::into_user).collect();
            Ok(Page::new(
                request,
                users,
                u64::try_from(total).unwrap_or_default(),
            ))
        })
        .await
    }
}
