//! User HTTP handlers.
//!
//! ```text
//! POST   /users
//! PATCH  /users/{user_id}
//! DELETE /users/{user_id}
//! GET    /users?page=<n>
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};
use pagination::{Page, PageNumber};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreateUserRequest, UpdateUserRequest};
use crate::domain::{User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldKind, FieldName, FieldSpec, QueryParams, RequestSchema, parse_path_id, read_body,
    validate,
};

const USER_ID_PARAM: FieldName = FieldName::new("userId");
const PAGE_PARAM: FieldName = FieldName::new("page");

/// Request payload for creating a user.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
    /// Passport identifier as `"<serie> <number>"`.
    #[schema(example = "2233 895044")]
    pub passport_number: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub name: String,
}

impl RequestSchema for CreateUserBody {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("PassportNumber", "passportNumber", FieldKind::String),
        FieldSpec::optional("Surname", "surname", FieldKind::String),
        FieldSpec::optional("Name", "name", FieldKind::String),
    ];
}

/// Request payload for a partial user update; absent fields are left alone.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    pub passport_number: Option<String>,
    pub surname: Option<String>,
    pub name: Option<String>,
}

impl RequestSchema for UpdateUserBody {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("PassportNumber", "passportNumber", FieldKind::String),
        FieldSpec::optional("Surname", "surname", FieldKind::String),
        FieldSpec::optional("Name", "name", FieldKind::String),
    ];
}

/// User as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub passport_serie: i32,
    pub passport_number: i32,
    pub surname: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            passport_serie: user.passport.serie(),
            passport_number: user.passport.number(),
            surname: user.surname,
            name: user.name,
        }
    }
}

/// One page of users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsersPageResponse {
    pub users: Vec<UserResponse>,
    pub page: u32,
    pub last_page: u64,
}

impl From<Page<User>> for UsersPageResponse {
    fn from(page: Page<User>) -> Self {
        let page = page.map(UserResponse::from);
        Self {
            users: page.items,
            page: page.page,
            last_page: page.last_page,
        }
    }
}

/// Query string for the user listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListUsersQuery {
    /// 1-based page; missing or malformed values select page 1.
    pub page: Option<String>,
}

impl ListUsersQuery {
    pub(crate) fn from_params(params: &QueryParams) -> Self {
        Self {
            page: params.first(PAGE_PARAM).map(str::to_owned),
        }
    }
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserBody,
    responses(
        (status = 200, description = "Created user", body = UserResponse),
        (status = 400, description = "Invalid request or duplicate passport", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: Result<web::Bytes, actix_web::Error>,
) -> ApiResult<web::Json<UserResponse>> {
    let body: CreateUserBody = validate(&read_body(payload)?)?;
    let user = state
        .users
        .create_user(CreateUserRequest {
            passport_number: body.passport_number,
            surname: body.surname,
            name: body.name,
        })
        .await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Update a subset of a user's fields.
#[utoipa::path(
    patch,
    path = "/users/{user_id}",
    params(("user_id" = i32, Path, description = "User identifier")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (
            status = 400,
            description = "Invalid request, unknown user or duplicate passport",
            body = ErrorBody
        ),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/users/{user_id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: Result<web::Bytes, actix_web::Error>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = UserId::new(parse_path_id(&path, USER_ID_PARAM)?);
    let body: UpdateUserBody = validate(&read_body(payload)?)?;
    let user = state
        .users
        .update_user(UpdateUserRequest {
            user_id,
            passport_number: body.passport_number,
            surname: body.surname,
            name: body.name,
        })
        .await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Delete a user and its tasks.
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    params(("user_id" = i32, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid identifier or unknown user", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{user_id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = UserId::new(parse_path_id(&path, USER_ID_PARAM)?);
    state.users.delete_user(user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List users one page at a time, ordered by identifier.
#[utoipa::path(
    get,
    path = "/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Page of users", body = UsersPageResponse),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<UsersPageResponse>> {
    let query = ListUsersQuery::from_params(&QueryParams::parse(req.query_string()));
    let page = PageNumber::parse_or_first(query.page.as_deref());
    let users = state.users_query.list_users(page).await?;
    Ok(web::Json(UsersPageResponse::from(users)))
}

#[cfg(test)]
mod tests;
