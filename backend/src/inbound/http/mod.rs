//! HTTP inbound adapter exposing the REST endpoints.

pub mod activities;
pub mod error;
pub mod state;
pub mod tasks;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every route on an actix service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(validation::MAX_BODY_BYTES))
        .service(users::create_user)
        .service(users::list_users)
        .service(users::update_user)
        .service(users::delete_user)
        .service(tasks::create_task)
        .service(tasks::finish_task)
        .service(activities::user_activity);
}
