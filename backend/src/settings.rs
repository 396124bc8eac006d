//! Application settings loaded via `OrthoConfig`.
//!
//! Values come from `TASK_TRACKER_*` environment variables, an optional
//! configuration file and command-line flags, in increasing precedence.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_PORT: u16 = 8080;
const DEFAULT_USERS_PAGE_SIZE: u32 = 5;
const DEFAULT_QUERY_TIMEOUT_MS: u64 = 5_000;

/// Errors raised when settings cannot be turned into a runnable service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("TASK_TRACKER_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("users page size must be at least 1")]
    ZeroPageSize,
}

/// Runtime configuration for the service binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASK_TRACKER")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Listen address; defaults to `127.0.0.1:8080`.
    pub bind_addr: Option<SocketAddr>,
    /// Users returned per listing page.
    pub users_page_size: Option<u32>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept open; `0` lets the pool drain.
    pub pool_min_idle: Option<u32>,
    /// Wait for a free connection, in milliseconds.
    pub pool_checkout_timeout_ms: Option<u64>,
    /// Per-query deadline in milliseconds.
    pub query_timeout_ms: Option<u64>,
    /// Apply pending migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Configured database URL.
    ///
    /// # Errors
    /// [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Listen address, falling back to the loopback default.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_BIND_PORT)))
    }

    /// Users per listing page.
    ///
    /// # Errors
    /// [`SettingsError::ZeroPageSize`] when configured as zero.
    pub fn users_page_size(&self) -> Result<u32, SettingsError> {
        match self.users_page_size.unwrap_or(DEFAULT_USERS_PAGE_SIZE) {
            0 => Err(SettingsError::ZeroPageSize),
            size => Ok(size),
        }
    }

    /// Pool configuration for the configured database.
    ///
    /// Sizing is checked when the pool is built.
    ///
    /// # Errors
    /// [`SettingsError::MissingDatabaseUrl`] when no URL is configured.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let mut config = PoolConfig::new(self.database_url()?);
        if let Some(max_size) = self.pool_max_size {
            config = config.with_max_size(max_size);
        }
        if let Some(min_idle) = self.pool_min_idle {
            config = config.with_min_idle(Some(min_idle).filter(|idle| *idle > 0));
        }
        if let Some(timeout_ms) = self.pool_checkout_timeout_ms {
            config = config.with_checkout_timeout(Duration::from_millis(timeout_ms));
        }
        Ok(config)
    }

    /// Deadline applied to each store call.
    #[must_use]
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms.unwrap_or(DEFAULT_QUERY_TIMEOUT_MS))
    }
}
