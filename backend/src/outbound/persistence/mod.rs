//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between internal row structs and domain values and
//! classify every store failure into a
//! [`RepositoryError`](crate::domain::ports::RepositoryError) before it
//! leaves this module. Diesel errors, pool errors and row structs are never
//! exposed.
//!
//! # Example
//!
//! ```no_run
//! use task_tracker::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), task_tracker::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tracker")).await?;
//! let users = DieselUserRepository::new(pool);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_task_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;
mod update_statement;

pub use diesel_error_mapping::DEFAULT_QUERY_TIMEOUT;
pub use diesel_task_repository::DieselTaskRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
