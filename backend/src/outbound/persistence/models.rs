//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain values.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Nullable, Text};

use crate::domain::{NewTask, NewUser, Passport, Task, TaskId, User, UserId};

use super::schema::{tasks, users};

/// Row read from the users table, by DSL or by raw SQL.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub user_id: i32,
    pub passport_serie: i32,
    pub passport_number: i32,
    pub surname: String,
    pub name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.user_id),
            passport: Passport::new(row.passport_serie, row.passport_number),
            surname: row.surname,
            name: row.name,
        }
    }
}

/// Insertable user record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub passport_serie: i32,
    pub passport_number: i32,
    pub surname: &'a str,
    pub name: &'a str,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            passport_serie: user.passport.serie(),
            passport_number: user.passport.number(),
            surname: &user.surname,
            name: &user.name,
        }
    }
}

/// One row of the paged user listing: the total count plus, when the page is
/// not empty, one user.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct UserPageRow {
    #[diesel(sql_type = BigInt)]
    pub total: i64,
    #[diesel(sql_type = Nullable<Integer>)]
    pub user_id: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub passport_serie: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub passport_number: Option<i32>,
    #[diesel(sql_type = Nullable<Text>)]
    pub surname: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub name: Option<String>,
}

impl UserPageRow {
    /// User carried by the row; `None` for the count-only row of an empty page.
    pub(crate) fn into_user(self) -> Option<User> {
        Some(User {
            id: UserId::new(self.user_id?),
            passport: Passport::new(self.passport_serie?, self.passport_number?),
            surname: self.surname?,
            name: self.name?,
        })
    }
}

/// Row read from the tasks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    pub task_id: i32,
    pub user_id: i32,
    pub task_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: TaskId::new(row.task_id),
            user_id: UserId::new(row.user_id),
            name: row.task_name,
            started_at: row.start_time,
            finished_at: row.end_time,
        }
    }
}

/// Insertable task record; `start_time` defaults to the store clock.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub(crate) struct NewTaskRow<'a> {
    pub user_id: i32,
    pub task_name: &'a str,
}

impl<'a> From<&'a NewTask> for NewTaskRow<'a> {
    fn from(task: &'a NewTask) -> Self {
        Self {
            user_id: task.user_id.get(),
            task_name: &task.name,
        }
    }
}
