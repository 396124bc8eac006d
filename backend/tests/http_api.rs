//! End-to-end HTTP behaviour against the in-memory store.
//!
//! Requests go through the real routing, validation, services and error
//! mapping; only PostgreSQL is replaced.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::TimeDelta;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use task_tracker::Trace;
use task_tracker::domain::{TRACE_ID_HEADER, TaskService, UserService};
use task_tracker::inbound::http::configure;
use task_tracker::inbound::http::state::HttpState;
use task_tracker::test_support::{InMemoryStore, MutableClock};

struct Harness {
    store: Arc<InMemoryStore>,
    clock: Arc<MutableClock>,
    state: web::Data<HttpState>,
}

#[fixture]
fn harness() -> Harness {
    let clock = Arc::new(MutableClock::at_reference_time());
    let store = Arc::new(InMemoryStore::new(clock.clone()));
    let users = Arc::new(UserService::new(store.clone(), 5));
    let tasks = Arc::new(TaskService::new(store.clone(), clock.clone()));
    let state = web::Data::new(HttpState::new(users.clone(), users, tasks.clone(), tasks));
    Harness {
        store,
        clock,
        state,
    }
}

fn app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = actix_web::Error,
    >,
> {
    App::new().app_data(state).wrap(Trace).configure(configure)
}

async fn read_json<B: MessageBody>(response: ServiceResponse<B>) -> (StatusCode, Value) {
    let status = response.status();
    assert!(
        response.headers().contains_key(TRACE_ID_HEADER),
        "every response carries a trace id"
    );
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

macro_rules! send {
    ($service:expr, $request:expr) => {
        read_json(actix_test::call_service(&$service, $request.to_request()).await).await
    };
}

fn create_user(passport: &str, name: &str, surname: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post().uri("/users").set_json(json!({
        "passportNumber": passport,
        "name": name,
        "surname": surname,
    }))
}

fn create_task(user_id: i64, name: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/tasks")
        .set_json(json!({"taskName": name, "userId": user_id}))
}

#[rstest]
#[actix_web::test]
async fn created_user_is_listed(harness: Harness) {
    let service = actix_test::init_service(app(harness.state)).await;

    let (status, created) = send!(service, create_user("2233 895044", "Ivan", "Petrov"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        created,
        json!({
            "id": 1,
            "passportSerie": 2233,
            "passportNumber": 895_044,
            "surname": "Petrov",
            "name": "Ivan",
        })
    );

    let (status, listed) = send!(service, actix_test::TestRequest::get().uri("/users"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!({"users": [created], "page": 1, "lastPage": 1}));
}

#[rstest]
#[actix_web::test]
async fn null_names_are_stored_as_empty(harness: Harness) {
    let service = actix_test::init_service(app(harness.state)).await;

    let request = actix_test::TestRequest::post().uri("/users").set_json(json!({
        "passportNumber": "1 2",
        "name": null,
        "surname": "Petrov",
    }));
    let (status, created) = send!(service, request);

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created.get("name").and_then(Value::as_str), Some(""));
    assert_eq!(created.get("surname").and_then(Value::as_str), Some("Petrov"));
}

#[rstest]
#[actix_web::test]
async fn duplicate_passport_is_rejected_and_not_stored(harness: Harness) {
    let service = actix_test::init_service(app(harness.state)).await;

    send!(service, create_user("2233 895044", "Ivan", "Petrov"));
    let (status, body) = send!(service, create_user("2233   895044", "Olga", "Sidorova"));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "User with passport number 2233   895044 already exists"})
    );
    assert_eq!(harness.store.user_count(), 1);
}

#[rstest]
#[case(
    "2233895044",
    "Incorrect passportNumber format. Passport serie and passport number should be divided with space"
)]
#[case(
    "AB 123",
    "Incorrect passportNumber format. Passport serie and passport number must be numbers, not strings"
)]
#[actix_web::test]
async fn malformed_passports_are_rejected(
    harness: Harness,
    #[case] passport: &str,
    #[case] message: &str,
) {
    let service = actix_test::init_service(app(harness.state)).await;

    let (status, body) = send!(service, create_user(passport, "Ivan", "Petrov"));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": message}));
    assert_eq!(harness.store.user_count(), 0);
}

#[rstest]
#[case("/users?page=1", 1, 5)]
#[case("/users?page=2", 2, 4)]
#[case("/users?page=3", 3, 0)]
#[case("/users?page=abc", 1, 5)]
#[case("/users", 1, 5)]
#[case("/users?page=2&page=1", 2, 4)]
#[actix_web::test]
async fn users_are_paged_by_five(
    harness: Harness,
    #[case] uri: &str,
    #[case] page: u64,
    #[case] count: usize,
) {
    let service = actix_test::init_service(app(harness.state)).await;
    for n in 1..=9 {
        send!(service, create_user(&format!("{n} {n}"), "Ivan", "Petrov"));
    }

    let (status, body) = send!(service, actix_test::TestRequest::get().uri(uri));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("page").and_then(Value::as_u64), Some(page));
    assert_eq!(body.get("lastPage").and_then(Value::as_u64), Some(2));
    assert_eq!(
        body.get("users").and_then(Value::as_array).map(Vec::len),
        Some(count)
    );
}

#[rstest]
#[actix_web::test]
async fn partial_update_changes_only_sent_fields(harness: Harness) {
    let service = actix_test::init_service(app(harness.state)).await;
    send!(service, create_user("2233 895044", "Ivan", "Petrov"));

    let request = actix_test::TestRequest::patch()
        .uri("/users/1")
        .set_json(json!({"passportNumber": "1111 2", "surname": "Ivanov"}));
    let (status, body) = send!(service, request);

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "passportSerie": 1111,
            "passportNumber": 2,
            "surname": "Ivanov",
            "name": "Ivan",
        })
    );
}

#[rstest]
#[case(json!({}), "/users/1", "No fields to update")]
#[case(json!({"name": "Olga"}), "/users/42", "User not found. User_id: 42")]
#[case(
    json!({"passportNumber": "1 1"}),
    "/users/2",
    "User with passport number 1 1 already exists"
)]
#[case(json!({"name": "Olga"}), "/users/x", "Parameter userId must be a number")]
#[actix_web::test]
async fn rejected_updates_leave_users_intact(
    harness: Harness,
    #[case] payload: Value,
    #[case] uri: &str,
    #[case] message: &str,
) {
    let service = actix_test::init_service(app(harness.state)).await;
    send!(service, create_user("1 1", "Ivan", "Petrov"));
    send!(service, create_user("2 2", "Olga", "Sidorova"));

    let request = actix_test::TestRequest::patch().uri(uri).set_json(payload);
    let (status, body) = send!(service, request);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": message}));

    let (_, listed) = send!(service, actix_test::TestRequest::get().uri("/users"));
    let names: Vec<&str> = listed
        .get("users")
        .and_then(Value::as_array)
        .map(|users| {
            users
                .iter()
                .filter_map(|user| user.get("name").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(names, vec!["Ivan", "Olga"]);
}

#[rstest]
#[actix_web::test]
async fn deleting_a_user_removes_their_tasks(harness: Harness) {
    let service = actix_test::init_service(app(harness.state)).await;
    send!(service, create_user("2233 895044", "Ivan", "Petrov"));
    send!(service, create_task(1, "Write report"));

    let (status, body) = send!(service, actix_test::TestRequest::delete().uri("/users/1"));
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    assert_eq!(harness.store.task_count(), 0);

    let (status, body) = send!(service, actix_test::TestRequest::delete().uri("/users/1"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "User not found. User_id: 1"}));
}

#[rstest]
#[actix_web::test]
async fn activity_report_orders_tasks_by_time_spent(harness: Harness) {
    let service = actix_test::init_service(app(harness.state)).await;
    send!(service, create_user("2233 895044", "Ivan", "Petrov"));

    let (status, first) = send!(service, create_task(1, "Write report"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first.get("taskId").and_then(Value::as_i64), Some(1));

    harness.clock.advance(TimeDelta::minutes(135));
    send!(service, create_task(1, "Review"));
    harness.clock.advance(TimeDelta::minutes(30));

    let request = actix_test::TestRequest::patch().uri("/tasks/2/finish");
    let (status, finished) = send!(service, request);
    assert_eq!(status, StatusCode::OK);
    assert!(finished.get("finishedAt").is_some());

    let (status, report) = send!(service, actix_test::TestRequest::get().uri("/user-activities/1"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        report,
        json!({
            "userId": 1,
            "tasks": [
                {"task_id": 1, "task_name": "Write report", "hours": 2, "minutes": 45, "is_finished": false},
                {"task_id": 2, "task_name": "Review", "hours": 0, "minutes": 30, "is_finished": true},
            ],
        })
    );

    let request =
        actix_test::TestRequest::get().uri("/user-activities/1?dateFrom=2024-01-01%2001:00");
    let (status, windowed) = send!(service, request);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        windowed
            .get("tasks")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(1)
    );
}

#[rstest]
#[case("", &["Morning", "Noon", "Evening"])]
#[case("?dateTo=2024-01-01%2001:30", &["Morning", "Noon"])]
#[case("?dateFrom=2024-01-01%2000:30&dateTo=2024-01-01%2001:30", &["Noon"])]
#[case("?dateFrom=2024-01-01%2001:00&dateTo=2024-01-01%2001:00", &["Noon"])]
#[case("?dateTo=2024-01-01%2001:30&dateTo=2024-01-01%2000:00", &["Morning", "Noon"])]
#[actix_web::test]
async fn activity_window_excludes_tasks_on_either_side(
    harness: Harness,
    #[case] query: &str,
    #[case] expected: &[&str],
) {
    let service = actix_test::init_service(app(harness.state)).await;
    send!(service, create_user("2233 895044", "Ivan", "Petrov"));
    for name in ["Morning", "Noon", "Evening"] {
        send!(service, create_task(1, name));
        harness.clock.advance(TimeDelta::hours(1));
    }

    let uri = format!("/user-activities/1{query}");
    let (status, report) = send!(service, actix_test::TestRequest::get().uri(&uri));

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = report
        .get("tasks")
        .and_then(Value::as_array)
        .map(|tasks| {
            tasks
                .iter()
                .filter_map(|task| task.get("task_name").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(names, expected);
}

#[rstest]
#[actix_web::test]
async fn task_errors_are_reported(harness: Harness) {
    let service = actix_test::init_service(app(harness.state)).await;
    send!(service, create_user("2233 895044", "Ivan", "Petrov"));
    send!(service, create_task(1, "Write report"));

    let (status, body) = send!(service, create_task(99, "Orphan"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "User with id=99 does not exist"}));

    send!(service, actix_test::TestRequest::patch().uri("/tasks/1/finish"));
    let (status, body) = send!(service, actix_test::TestRequest::patch().uri("/tasks/1/finish"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Task 1 is already finished"}));

    let (status, body) = send!(service, actix_test::TestRequest::patch().uri("/tasks/99/finish"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Task not found. Task_id: 99"}));
}
