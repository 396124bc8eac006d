//! Tests for user HTTP handlers.

use super::*;
use crate::domain::{Error, Passport};
use crate::inbound::http::test_utils::{MockPorts, test_app};
use crate::inbound::http::validation::MAX_BODY_BYTES;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use mockall::predicate::eq;
use pagination::PageRequest;
use rstest::rstest;
use serde_json::{Value, json};

fn ivan(id: i32) -> User {
    User {
        id: UserId::new(id),
        passport: Passport::new(2233, 895_044),
        surname: "Petrov".to_owned(),
        name: "Ivan".to_owned(),
    }
}

async fn call(ports: MockPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

#[actix_web::test]
async fn create_user_returns_the_stored_user() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_create_user()
        .with(eq(CreateUserRequest {
            passport_number: "2233 895044".to_owned(),
            surname: "Petrov".to_owned(),
            name: "Ivan".to_owned(),
        }))
        .times(1)
        .return_once(|_| Ok(ivan(1)));

    let request = actix_test::TestRequest::post().uri("/users").set_json(json!({
        "passportNumber": "2233 895044",
        "surname": "Petrov",
        "name": "Ivan",
    }));
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "passportSerie": 2233,
            "passportNumber": 895_044,
            "surname": "Petrov",
            "name": "Ivan",
        })
    );
}

#[rstest]
#[case(
    json!({"surname": "Petrov"}),
    "Validation failed on field 'PassportNumber', condition: 'required'"
)]
#[case(
    json!({"passportNumber": ""}),
    "Validation failed on field 'PassportNumber', condition: 'required'"
)]
#[case(json!({"passportNumber": 2233}), "Field 'passportNumber' must be of type string")]
#[case(json!({"passportNumber": "2233 1", "name": 5}), "Field 'name' must be of type string")]
#[actix_web::test]
async fn create_user_rejects_invalid_bodies_without_calling_the_service(
    #[case] payload: Value,
    #[case] message: &str,
) {
    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(payload);
    let (status, body) = call(MockPorts::default(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": message}));
}

#[actix_web::test]
async fn create_user_rejects_oversized_bodies_as_json() {
    let padding = "x".repeat(MAX_BODY_BYTES);
    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"passportNumber": "1 2", "name": padding}));
    let (status, body) = call(MockPorts::default(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Request body could not be read"}));
}

#[actix_web::test]
async fn create_user_surfaces_conflicts_as_bad_request() {
    let mut ports = MockPorts::default();
    ports.users.expect_create_user().return_once(|_| {
        Err(Error::conflict(
            "User with passport number 2233 895044 already exists",
        ))
    });

    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"passportNumber": "2233 895044"}));
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "User with passport number 2233 895044 already exists"})
    );
}

#[actix_web::test]
async fn update_user_forwards_present_fields() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_update_user()
        .with(eq(UpdateUserRequest {
            user_id: UserId::new(7),
            passport_number: None,
            surname: None,
            name: Some("Pyotr".to_owned()),
        }))
        .times(1)
        .return_once(|_| {
            let mut user = ivan(7);
            user.name = "Pyotr".to_owned();
            Ok(user)
        });

    let request = actix_test::TestRequest::patch()
        .uri("/users/7")
        .set_json(json!({"name": "Pyotr"}));
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("name").and_then(Value::as_str), Some("Pyotr"));
    assert_eq!(body.get("id").and_then(Value::as_i64), Some(7));
}

#[rstest]
#[case("/users/abc")]
#[case("/users/1.5")]
#[actix_web::test]
async fn update_user_rejects_non_numeric_ids(#[case] uri: &str) {
    let request = actix_test::TestRequest::patch()
        .uri(uri)
        .set_json(json!({"name": "x"}));
    let (status, body) = call(MockPorts::default(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Parameter userId must be a number"}));
}

#[actix_web::test]
async fn delete_user_returns_no_content() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_delete_user()
        .with(eq(UserId::new(3)))
        .times(1)
        .return_once(|_| Ok(()));

    let request = actix_test::TestRequest::delete().uri("/users/3");
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[actix_web::test]
async fn delete_user_reports_unknown_users() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_delete_user()
        .return_once(|_| Err(Error::not_found("User not found. User_id: 3")));

    let request = actix_test::TestRequest::delete().uri("/users/3");
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "User not found. User_id: 3"}));
}

#[actix_web::test]
async fn delete_user_redacts_internal_failures() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_delete_user()
        .return_once(|_| Err(Error::internal("connection reset by peer")));

    let request = actix_test::TestRequest::delete().uri("/users/3");
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal server error"}));
}

#[rstest]
#[case("/users?page=2", 2)]
#[case("/users", 1)]
#[case("/users?page=abc", 1)]
#[case("/users?page=0", 1)]
#[case("/users?page=-4", 1)]
#[case("/users?page=2&page=3", 2)]
#[case("/users?page=x&page=3", 1)]
#[actix_web::test]
async fn list_users_normalises_the_page_number(#[case] uri: &str, #[case] expected: u32) {
    let mut ports = MockPorts::default();
    ports
        .users_query
        .expect_list_users()
        .withf(move |page| page.get() == expected)
        .times(1)
        .returning(|page| {
            let request = PageRequest::new(page, 5).expect("non-zero page size");
            Ok(Page::new(&request, vec![ivan(1)], 9))
        });

    let request = actix_test::TestRequest::get().uri(uri);
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("page").and_then(Value::as_u64), Some(u64::from(expected)));
    assert_eq!(body.get("lastPage").and_then(Value::as_u64), Some(2));
    assert_eq!(
        body.get("users").and_then(Value::as_array).map(Vec::len),
        Some(1)
    );
}
