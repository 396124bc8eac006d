//! User activity report.
//!
//! ```text
//! GET /user-activities/{user_id}?dateFrom=YYYY-MM-DD HH:MM&dateTo=YYYY-MM-DD HH:MM
//! ```

use actix_web::{HttpRequest, get, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ActivityWindow, Error, TaskActivity, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, QueryParams, parse_path_id, parse_query_timestamp,
};

const USER_ID_PARAM: FieldName = FieldName::new("userId");
const DATE_FROM_PARAM: FieldName = FieldName::new("dateFrom");
const DATE_TO_PARAM: FieldName = FieldName::new("dateTo");

/// Optional bounds on task start times, inclusive.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ActivityQuery {
    /// Earliest start time, `YYYY-MM-DD HH:MM` in UTC.
    pub date_from: Option<String>,
    /// Latest start time, `YYYY-MM-DD HH:MM` in UTC.
    pub date_to: Option<String>,
}

impl ActivityQuery {
    pub(crate) fn from_params(params: &QueryParams) -> Self {
        Self {
            date_from: params.first(DATE_FROM_PARAM).map(str::to_owned),
            date_to: params.first(DATE_TO_PARAM).map(str::to_owned),
        }
    }
}

/// Time spent on one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaskActivityResponse {
    pub task_id: i32,
    pub task_name: String,
    pub hours: i64,
    pub minutes: i64,
    pub is_finished: bool,
}

impl From<TaskActivity> for TaskActivityResponse {
    fn from(activity: TaskActivity) -> Self {
        Self {
            task_id: activity.task_id.get(),
            task_name: activity.task_name,
            hours: activity.hours,
            minutes: activity.minutes,
            is_finished: activity.is_finished,
        }
    }
}

/// Activity report for one user, longest task first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub user_id: i32,
    pub tasks: Vec<TaskActivityResponse>,
}

fn parse_window(query: &ActivityQuery) -> Result<ActivityWindow, Error> {
    let from = parse_query_timestamp(query.date_from.as_deref(), DATE_FROM_PARAM)?;
    let to = parse_query_timestamp(query.date_to.as_deref(), DATE_TO_PARAM)?;
    ActivityWindow::new(from, to).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": DATE_FROM_PARAM.as_str(),
            "code": "inverted_window",
        }))
    })
}

/// Report time spent per task for a user.
#[utoipa::path(
    get,
    path = "/user-activities/{user_id}",
    params(
        ("user_id" = i32, Path, description = "User identifier"),
        ActivityQuery
    ),
    responses(
        (status = 200, description = "Activity report", body = ActivityResponse),
        (status = 400, description = "Invalid identifier or window", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["tasks"],
    operation_id = "userActivity"
)]
#[get("/user-activities/{user_id}")]
pub async fn user_activity(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    req: HttpRequest,
) -> ApiResult<web::Json<ActivityResponse>> {
    let user_id = UserId::new(parse_path_id(&path, USER_ID_PARAM)?);
    let query = ActivityQuery::from_params(&QueryParams::parse(req.query_string()));
    let window = parse_window(&query)?;
    let tasks = state.activity.user_activity(user_id, window).await?;
    Ok(web::Json(ActivityResponse {
        user_id: user_id.get(),
        tasks: tasks.into_iter().map(TaskActivityResponse::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskId;
    use crate::inbound::http::test_utils::{MockPorts, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::{TimeZone, Utc};
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::Value;

    async fn call(ports: MockPorts, uri: &str) -> (StatusCode, Value) {
        let app = actix_test::init_service(test_app(ports)).await;
        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let response = actix_test::call_service(&app, request).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, serde_json::from_slice(&body).expect("JSON body"))
    }

    #[rstest]
    #[actix_web::test]
    async fn reports_activity_in_service_order() {
        let from = Utc
            .with_ymd_and_hms(2024, 5, 1, 8, 0, 0)
            .single()
            .expect("valid timestamp");
        let window = ActivityWindow::new(Some(from), None).expect("valid window");
        let mut ports = MockPorts::default();
        ports
            .activity
            .expect_user_activity()
            .with(eq(UserId::new(4)), eq(window))
            .times(1)
            .return_once(|_, _| {
                Ok(vec![
                    TaskActivity {
                        task_id: TaskId::new(2),
                        task_name: "Review".to_owned(),
                        hours: 3,
                        minutes: 5,
                        is_finished: true,
                    },
                    TaskActivity {
                        task_id: TaskId::new(1),
                        task_name: "Write".to_owned(),
                        hours: 0,
                        minutes: 40,
                        is_finished: false,
                    },
                ])
            });

        let (status, body) = call(ports, "/user-activities/4?dateFrom=2024-05-01%2008:00").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "userId": 4,
                "tasks": [
                    {"task_id": 2, "task_name": "Review", "hours": 3, "minutes": 5, "is_finished": true},
                    {"task_id": 1, "task_name": "Write", "hours": 0, "minutes": 40, "is_finished": false},
                ],
            })
        );
    }

    #[rstest]
    #[case(
        "/user-activities/x",
        "Parameter userId must be a number"
    )]
    #[case(
        "/user-activities/4?dateFrom=2024-05-01",
        "Parameter dateFrom must be a date. Format YYYY-MM-DD HH:MM"
    )]
    #[case(
        "/user-activities/4?dateTo=tomorrow",
        "Parameter dateTo must be a date. Format YYYY-MM-DD HH:MM"
    )]
    #[case(
        "/user-activities/4?dateFrom=a&dateFrom=2024-05-01%2000:00",
        "Parameter dateFrom must be a date. Format YYYY-MM-DD HH:MM"
    )]
    #[case(
        "/user-activities/4?dateFrom=2024-05-02%2000:00&dateTo=2024-05-01%2000:00",
        "dateFrom must not be later than dateTo"
    )]
    #[actix_web::test]
    async fn rejects_invalid_parameters(#[case] uri: &str, #[case] message: &str) {
        let (status, body) = call(MockPorts::default(), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": message}));
    }
}
