//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::activities::{ActivityResponse, TaskActivityResponse};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::tasks::{CreateTaskBody, TaskResponse};
use crate::inbound::http::users::{
    CreateUserBody, UpdateUserBody, UserResponse, UsersPageResponse,
};

/// OpenAPI document listing every endpoint and payload schema.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Task tracker API",
        description = "Users identified by passport, and the time they spend on tasks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::finish_task,
        crate::inbound::http::activities::user_activity,
    ),
    components(schemas(
        ErrorBody,
        CreateUserBody,
        UpdateUserBody,
        UserResponse,
        UsersPageResponse,
        CreateTaskBody,
        TaskResponse,
        ActivityResponse,
        TaskActivityResponse,
    )),
    tags(
        (name = "users", description = "User registration and maintenance"),
        (name = "tasks", description = "Task timing and activity reports")
    )
)]
pub struct ApiDoc;
