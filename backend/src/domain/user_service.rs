//! User use-cases.
//!
//! Implements [`UsersCommand`] and [`UsersQuery`] on top of a
//! [`UserRepository`]. Repository failures are reclassified into the fixed,
//! client-facing messages below; anything unexpected collapses into an
//! internal error whose detail never reaches the caller.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageNumber, PageRequest};
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{
    CreateUserRequest, RepositoryError, UpdateUserRequest, UserRepository, UsersCommand,
    UsersQuery,
};
use crate::domain::{
    Error, INTERNAL_ERROR_MESSAGE, NewUser, Passport, User, UserChanges, UserId, build_update,
    parse_identifier,
};

/// User service implementing the user driving ports.
#[derive(Clone)]
pub struct UserService<R> {
    repo: Arc<R>,
    page_size: u32,
}

impl<R> UserService<R> {
    /// Create a service listing `page_size` users per page.
    pub fn new(repo: Arc<R>, page_size: u32) -> Self {
        Self { repo, page_size }
    }
}

fn parse_passport(raw: &str) -> Result<Passport, Error> {
    parse_identifier(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "passportNumber",
            "value": raw,
        }))
    })
}

fn user_not_found(user_id: UserId) -> Error {
    Error::not_found(format!("User not found. User_id: {user_id}"))
}

pub(crate) fn internal_failure(operation: &'static str, error: &RepositoryError) -> Error {
    debug!(operation, %error, "repository failure collapsed to internal error");
    Error::internal(INTERNAL_ERROR_MESSAGE)
}

fn map_create_error(error: RepositoryError, raw_passport: &str) -> Error {
    match error {
        RepositoryError::Conflict { .. } => Error::conflict(format!(
            "User with passport number {raw_passport} already exists"
        )),
        other => internal_failure("create_user", &other),
    }
}

fn map_update_error(error: RepositoryError, user_id: UserId, changes: &UserChanges) -> Error {
    match (error, changes.passport) {
        (RepositoryError::NotFound { .. }, _) => user_not_found(user_id),
        (RepositoryError::Conflict { .. }, Some(passport)) => Error::conflict(format!(
            "User with passport number {passport} already exists"
        )),
        (other, _) => internal_failure("update_user", &other),
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error> {
        let passport = parse_passport(&request.passport_number)?;
        let new_user = NewUser {
            passport,
            surname: request.surname,
            name: request.name,
        };
        self.repo
            .create(&new_user)
            .await
            .map_err(|err| map_create_error(err, &request.passport_number))
    }

    async fn update_user(&self, request: UpdateUserRequest) -> Result<User, Error> {
        let passport = request
            .passport_number
            .as_deref()
            .map(parse_passport)
            .transpose()?;
        let changes = UserChanges {
            passport,
            surname: request.surname,
            name: request.name,
        };
        let spec = build_update(&changes).map_err(|err| Error::invalid_request(err.to_string()))?;
        self.repo
            .update(request.user_id, &spec)
            .await
            .map_err(|err| map_update_error(err, request.user_id, &changes))
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), Error> {
        self.repo.delete(user_id).await.map_err(|err| match err {
            RepositoryError::NotFound { .. } => user_not_found(user_id),
            other => internal_failure("delete_user", &other),
        })
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self, page: PageNumber) -> Result<Page<User>, Error> {
        let request = PageRequest::new(page, self.page_size).map_err(|err| {
            debug!(%err, page_size = self.page_size, "invalid page size configured");
            Error::internal(INTERNAL_ERROR_MESSAGE)
        })?;
        self.repo
            .list(&request)
            .await
            .map_err(|err| internal_failure("list_users", &err))
    }
}
