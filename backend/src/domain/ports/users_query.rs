//! Driving port for user listings.

use async_trait::async_trait;
use pagination::{Page, PageNumber};

use crate::domain::{Error, User};

/// Use-case for paging through users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch page `page` using the configured page size.
    async fn list_users(&self, page: PageNumber) -> Result<Page<User>, Error>;
}
