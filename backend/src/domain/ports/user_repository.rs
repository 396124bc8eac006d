//! Port for user persistence.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{NewUser, UpdateSpec, User, UserId};

use super::RepositoryError;

/// Subject reported in [`RepositoryError::NotFound`] for users.
pub const USER_SUBJECT: &str = "User";

/// Constraint reported when two users share a passport identifier.
pub const PASSPORT_UNIQUE_CONSTRAINT: &str = "users_passport_unique";

/// Port for storing and reading users.
///
/// Implementations enforce passport uniqueness and report it as
/// [`RepositoryError::Conflict`]. Operations addressing a missing id return
/// [`RepositoryError::NotFound`] with subject [`USER_SUBJECT`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with its assigned id.
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// Apply `spec` to the user with `id` and return the updated row.
    async fn update(&self, id: UserId, spec: &UpdateSpec) -> Result<User, RepositoryError>;

    /// Remove the user with `id`.
    async fn delete(&self, id: UserId) -> Result<(), RepositoryError>;

    /// Read one page of users ordered by id, with the total count taken from
    /// the same read.
    async fn list(&self, request: &PageRequest) -> Result<Page<User>, RepositoryError>;
}
