//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use task_tracker::outbound::persistence::{DEFAULT_QUERY_TIMEOUT, DbPool};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) users_page_size: u32,
    pub(crate) query_timeout: Duration,
}

impl ServerConfig {
    /// Serve on `bind_addr` with repositories drawing from `db_pool`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            db_pool,
            users_page_size: 5,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Users returned per listing page.
    #[must_use]
    pub fn with_users_page_size(mut self, page_size: u32) -> Self {
        self.users_page_size = page_size;
        self
    }

    /// Deadline applied to each store call.
    #[must_use]
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }
}
