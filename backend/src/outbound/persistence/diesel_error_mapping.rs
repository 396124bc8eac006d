//! Classification of store failures into [`RepositoryError`].
//!
//! Uniqueness violations become conflicts, missing rows and dangling foreign
//! keys become not-found for the statement's [`Target`], and everything else
//! is logged with its full detail and reported as an opaque operation failure.

use std::future::Future;
use std::time::Duration;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, error};

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Upper bound on a single repository call unless configured otherwise.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Row a statement addresses, reported when the store finds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Target {
    subject: &'static str,
    key: i64,
}

impl Target {
    pub(crate) fn new(subject: &'static str, key: impl Into<i64>) -> Self {
        Self {
            subject,
            key: key.into(),
        }
    }

    pub(crate) fn not_found(self) -> RepositoryError {
        RepositoryError::not_found(self.subject, self.key)
    }
}

/// Map pool checkout failures to an operation failure.
pub(crate) fn map_pool_error(operation: &'static str, error: PoolError) -> RepositoryError {
    error!(operation, %error, "database connection unavailable");
    RepositoryError::operation_failure("database connection unavailable")
}

/// Classify a Diesel error raised by `operation`.
///
/// `target` names the row a missing result or foreign-key violation refers
/// to; without one, both are treated as operation failures.
pub(crate) fn map_diesel_error(
    operation: &'static str,
    target: Option<Target>,
    error: DieselError,
) -> RepositoryError {
    match (error, target) {
        (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info), _) => {
            let constraint = info.constraint_name().unwrap_or("unique").to_owned();
            debug!(operation, constraint = %constraint, "unique constraint rejected write");
            RepositoryError::conflict(constraint)
        }
        (
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info),
            Some(target),
        ) => {
            debug!(
                operation,
                constraint = info.constraint_name(),
                ?target,
                "foreign key references a missing row"
            );
            target.not_found()
        }
        (DieselError::NotFound, Some(target)) => {
            debug!(operation, ?target, "statement matched no rows");
            target.not_found()
        }
        (other, _) => {
            match &other {
                DieselError::DatabaseError(kind, info) => error!(
                    operation,
                    ?kind,
                    message = info.message(),
                    details = info.details(),
                    "database operation failed"
                ),
                _ => error!(operation, error = %other, "database operation failed"),
            }
            RepositoryError::operation_failure("database operation failed")
        }
    }
}

/// Run `work`, abandoning it once `limit` elapses.
///
/// Dropping the future cancels the in-flight statement and returns its
/// connection to the pool.
pub(crate) async fn with_timeout<T, F>(
    operation: &'static str,
    limit: Duration,
    work: F,
) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, RepositoryError>>,
{
    match tokio::time::timeout(limit, work).await {
        Ok(result) => result,
        Err(_) => {
            error!(
                operation,
                timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                "database operation timed out"
            );
            Err(RepositoryError::operation_failure("database operation timed out"))
        }
    }
}
