//! Service entry point: loads settings, prepares the database and serves
//! the REST API.

mod server;

use std::io;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use task_tracker::outbound::persistence::{DbPool, run_migrations};
use task_tracker::settings::AppSettings;

async fn apply_migrations(database_url: String) -> io::Result<()> {
    let applied = tokio::task::spawn_blocking(move || run_migrations(&database_url))
        .await
        .map_err(io::Error::other)?
        .map_err(io::Error::other)?;
    info!(applied, "database schema is current");
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|e| io::Error::other(format!("load settings: {e}")))?;
    let database_url = settings.database_url().map_err(io::Error::other)?.to_owned();
    let users_page_size = settings.users_page_size().map_err(io::Error::other)?;

    if settings.run_migrations {
        apply_migrations(database_url.clone()).await?;
    }

    let pool_config = settings.pool_config().map_err(io::Error::other)?;
    let pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;

    let config = ServerConfig::new(settings.bind_addr(), pool)
        .with_users_page_size(users_page_size)
        .with_query_timeout(settings.query_timeout());

    create_server(config)?.await
}
