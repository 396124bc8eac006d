//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`) describe what the domain needs from storage
//! and report failures as [`RepositoryError`]. Driving ports (`*Command`,
//! `*Query`) are the use-cases inbound adapters call; they report failures as
//! [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod repository_error;
mod task_repository;
mod tasks_command;
mod user_activity_query;
mod user_repository;
mod users_command;
mod users_query;

pub use repository_error::RepositoryError;
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{TASK_OPEN_CONSTRAINT, TASK_SUBJECT, TaskRepository};
#[cfg(test)]
pub use tasks_command::MockTasksCommand;
pub use tasks_command::{CreateTaskRequest, TasksCommand};
#[cfg(test)]
pub use user_activity_query::MockUserActivityQuery;
pub use user_activity_query::UserActivityQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{PASSPORT_UNIQUE_CONSTRAINT, USER_SUBJECT, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{CreateUserRequest, UpdateUserRequest, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
