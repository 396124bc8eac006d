//! Wiring of PostgreSQL repositories into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use task_tracker::domain::{TaskService, UserService};
use task_tracker::inbound::http::state::HttpState;
use task_tracker::outbound::persistence::{DieselTaskRepository, DieselUserRepository};

use super::ServerConfig;

/// Build handler state backed by Diesel repositories.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let user_repo = Arc::new(
        DieselUserRepository::new(config.db_pool.clone()).with_query_timeout(config.query_timeout),
    );
    let task_repo = Arc::new(
        DieselTaskRepository::new(config.db_pool.clone()).with_query_timeout(config.query_timeout),
    );

    let users = Arc::new(UserService::new(user_repo, config.users_page_size));
    let tasks = Arc::new(TaskService::new(task_repo, Arc::new(DefaultClock)));

    web::Data::new(HttpState::new(
        users.clone(),
        users,
        tasks.clone(),
        tasks,
    ))
}
