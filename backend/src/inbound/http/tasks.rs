//! Task HTTP handlers.
//!
//! ```text
//! POST  /tasks
//! PATCH /tasks/{task_id}/finish
//! ```

use actix_web::{patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreateTaskRequest;
use crate::domain::{Task, TaskId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldKind, FieldName, FieldSpec, RequestSchema, parse_path_id, read_body, validate,
};

const TASK_ID_PARAM: FieldName = FieldName::new("taskId");

/// Request payload for starting a task.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    #[schema(example = "Write report")]
    pub task_name: String,
    pub user_id: i32,
}

impl RequestSchema for CreateTaskBody {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("TaskName", "taskName", FieldKind::String),
        FieldSpec::required("UserId", "userId", FieldKind::Integer),
    ];
}

/// Task as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub task_id: i32,
    pub task_name: String,
    pub user_id: i32,
    /// RFC 3339 start time.
    pub created_at: String,
    /// RFC 3339 finish time; omitted while the task is open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            task_id: task.id.get(),
            task_name: task.name,
            user_id: task.user_id.get(),
            created_at: task.started_at.to_rfc3339(),
            finished_at: task.finished_at.map(|at| at.to_rfc3339()),
        }
    }
}

/// Start a task for a user.
#[utoipa::path(
    post,
    path = "/tasks",
    request_body = CreateTaskBody,
    responses(
        (status = 200, description = "Started task", body = TaskResponse),
        (status = 400, description = "Invalid request or unknown user", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    payload: Result<web::Bytes, actix_web::Error>,
) -> ApiResult<web::Json<TaskResponse>> {
    let body: CreateTaskBody = validate(&read_body(payload)?)?;
    let task = state
        .tasks
        .create_task(CreateTaskRequest {
            user_id: UserId::new(body.user_id),
            task_name: body.task_name,
        })
        .await?;
    Ok(web::Json(TaskResponse::from(task)))
}

/// Stop the clock on an open task.
#[utoipa::path(
    patch,
    path = "/tasks/{task_id}/finish",
    params(("task_id" = i32, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Finished task", body = TaskResponse),
        (
            status = 400,
            description = "Invalid identifier, unknown or finished task",
            body = ErrorBody
        ),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["tasks"],
    operation_id = "finishTask"
)]
#[patch("/tasks/{task_id}/finish")]
pub async fn finish_task(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TaskResponse>> {
    let task_id = TaskId::new(parse_path_id(&path, TASK_ID_PARAM)?);
    let task = state.tasks.finish_task(task_id).await?;
    Ok(web::Json(TaskResponse::from(task)))
}
