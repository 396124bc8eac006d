//! bb8 pool of async Diesel connections shared by both repositories.
//!
//! Every repository call checks a connection out for the duration of one
//! statement (two for `finish`), so the pool ceiling bounds concurrent store
//! work for the whole service.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use tracing::info;

/// Failures building the pool or checking out a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("pool sizing is invalid: {message}")]
    Sizing { message: String },
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
    #[error("no connection available: {message}")]
    Checkout { message: String },
}

impl PoolError {
    pub(crate) fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }
}

/// Sizing and timeouts for [`DbPool`].
///
/// ```
/// use std::time::Duration;
/// use task_tracker::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://tracker@localhost/tracker")
///     .with_max_size(4)
///     .with_min_idle(Some(2))
///     .with_checkout_timeout(Duration::from_secs(2));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    checkout_timeout: Duration,
}

impl PoolConfig {
    pub const DEFAULT_MAX_SIZE: u32 = 10;
    pub const DEFAULT_MIN_IDLE: u32 = 1;
    pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: Self::DEFAULT_MAX_SIZE,
            min_idle: Some(Self::DEFAULT_MIN_IDLE),
            checkout_timeout: Self::DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Idle connections kept warm; `None` lets the pool drain completely.
    #[must_use]
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// How long a repository call waits for a free connection.
    #[must_use]
    pub fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }

    /// Reject sizings bb8 would refuse or silently misbehave with.
    ///
    /// # Errors
    /// [`PoolError::Sizing`] for a zero ceiling, more idle connections than
    /// the ceiling allows, or a zero checkout timeout.
    pub fn validate(&self) -> Result<(), PoolError> {
        let problem = if self.max_size == 0 {
            Some("max size must be at least 1".to_owned())
        } else if let Some(idle) = self.min_idle.filter(|idle| *idle > self.max_size) {
            Some(format!("min idle {idle} exceeds max size {}", self.max_size))
        } else if self.checkout_timeout.is_zero() {
            Some("checkout timeout must be positive".to_owned())
        } else {
            None
        };
        problem.map_or(Ok(()), |message| Err(PoolError::Sizing { message }))
    }
}

/// Shared connection pool; cloning shares the underlying connections.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Validate `config` and build the pool. Connections open lazily.
    ///
    /// # Errors
    /// [`PoolError::Sizing`] or [`PoolError::Build`].
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url);
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.checkout_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::Build {
                message: err.to_string(),
            })?;
        info!(
            max_size = config.max_size,
            min_idle = config.min_idle,
            checkout_timeout_ms = u64::try_from(config.checkout_timeout.as_millis())
                .unwrap_or(u64::MAX),
            "database pool ready"
        );
        Ok(Self { inner })
    }

    pub(crate) async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
