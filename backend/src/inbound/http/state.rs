//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see domain
//! ports, so they stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::{TasksCommand, UserActivityQuery, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub tasks: Arc<dyn TasksCommand>,
    pub activity: Arc<dyn UserActivityQuery>,
}

impl HttpState {
    /// Bundle the port implementations handlers depend on.
    pub fn new(
        users: Arc<dyn UsersCommand>,
        users_query: Arc<dyn UsersQuery>,
        tasks: Arc<dyn TasksCommand>,
        activity: Arc<dyn UserActivityQuery>,
    ) -> Self {
        Self {
            users,
            users_query,
            tasks,
            activity,
        }
    }
}
