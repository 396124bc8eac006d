//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Raw create payload after structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// Unparsed `"<serie> <number>"` identifier.
    pub passport_number: String,
    pub surname: String,
    pub name: String,
}

/// Raw partial-update payload; `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub user_id: UserId,
    /// Unparsed `"<serie> <number>"` identifier, when present.
    pub passport_number: Option<String>,
    pub surname: Option<String>,
    pub name: Option<String>,
}

/// Use-cases that change users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Parse the identifier and store a new user.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error>;

    /// Apply the present fields of `request` to an existing user.
    async fn update_user(&self, request: UpdateUserRequest) -> Result<User, Error>;

    /// Remove a user.
    async fn delete_user(&self, user_id: UserId) -> Result<(), Error>;
}
