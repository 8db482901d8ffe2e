//! Tests for users API handlers.

use super::*;
use crate::domain::test_clock::today_at;
use crate::inbound::http::test_utils::{memory_state, send, test_app};
use actix_web::App;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

fn users_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    test_app(memory_state(today_at(9, 0))).service(
        web::scope("/api/v1")
            .service(create_user)
            .service(list_users)
            .service(get_user_by_email)
            .service(get_user)
            .service(update_user)
            .service(delete_user),
    )
}

fn create(name: &str, email: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({ "name": name, "email": email }))
}

#[rstest]
#[actix_web::test]
async fn create_returns_camel_case_user_with_defaults() {
    let app = actix_test::init_service(users_app()).await;

    let (status, body) = send(&app, create("Ada Lovelace", "ada@example.com")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.get("id").and_then(Value::as_i64), Some(1));
    assert_eq!(body.get("roles"), Some(&json!(["user"])));
    assert_eq!(body.get("enabled"), Some(&json!(true)));
    assert!(body.get("registered").is_some());
}

#[rstest]
#[case(json!({"name": " ", "email": "ada@example.com"}), "name", "empty_name")]
#[case(json!({"name": "Ada", "email": "ada"}), "email", "malformed_email")]
#[case(
    json!({"name": "Ada", "email": "ada@example.com", "roles": ["owner"]}),
    "roles",
    "unknown_role"
)]
#[actix_web::test]
async fn create_rejects_invalid_fields(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(users_app()).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.get("code").and_then(Value::as_str), Some("invalid_request"));
    let details = body.get("details").expect("details present");
    assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
    assert_eq!(details.get("code").and_then(Value::as_str), Some(code));
}

#[rstest]
#[actix_web::test]
async fn malformed_body_is_an_invalid_request() {
    let app = actix_test::init_service(users_app()).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"email": "ada@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.pointer("/details/code").and_then(Value::as_str),
        Some("invalid_body")
    );
    assert!(body.get("traceId").and_then(Value::as_str).is_some());
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_a_conflict() {
    let app = actix_test::init_service(users_app()).await;
    send(&app, create("Ada", "ada@example.com")).await;

    let (status, body) = send(&app, create("Imposter", "ada@example.com")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.get("code").and_then(Value::as_str), Some("conflict"));
}

#[rstest]
#[actix_web::test]
async fn lookup_by_email_and_id() {
    let app = actix_test::init_service(users_app()).await;
    send(&app, create("Grace", "grace@example.com")).await;
    send(&app, create("Ada", "ada@example.com")).await;

    let (status, by_email) = send(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/users/by-email?email=ada@example.com"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_email.get("id").and_then(Value::as_i64), Some(2));

    let (status, by_id) = send(&app, actix_test::TestRequest::get().uri("/api/v1/users/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id.get("name").and_then(Value::as_str), Some("Grace"));

    let (_, all) = send(&app, actix_test::TestRequest::get().uri("/api/v1/users")).await;
    let emails: Vec<&str> = all
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|user| user.get("email").and_then(Value::as_str))
        .collect();
    assert_eq!(emails, vec!["ada@example.com", "grace@example.com"]);
}

#[rstest]
#[case("/api/v1/users/by-email?email=nobody@example.com")]
#[case("/api/v1/users/42")]
#[actix_web::test]
async fn unknown_users_are_not_found(#[case] uri: &str) {
    let app = actix_test::init_service(users_app()).await;

    let (status, body) = send(&app, actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.get("code").and_then(Value::as_str), Some("not_found"));
}

#[rstest]
#[actix_web::test]
async fn non_positive_id_is_an_invalid_request() {
    let app = actix_test::init_service(users_app()).await;

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/api/v1/users/0")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.pointer("/details/field").and_then(Value::as_str),
        Some("id")
    );
}

#[rstest]
#[actix_web::test]
async fn update_keeps_omitted_fields() {
    let app = actix_test::init_service(users_app()).await;
    let (_, created) = send(
        &app,
        actix_test::TestRequest::post().uri("/api/v1/users").set_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "roles": ["user", "admin"],
        })),
    )
    .await;

    let (status, _) = send(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/users/1")
            .set_json(json!({"name": "Ada Lovelace", "email": "ada@lovelace.org"})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, stored) = send(&app, actix_test::TestRequest::get().uri("/api/v1/users/1")).await;
    assert_eq!(stored.get("name").and_then(Value::as_str), Some("Ada Lovelace"));
    assert_eq!(stored.get("email").and_then(Value::as_str), Some("ada@lovelace.org"));
    assert_eq!(stored.get("roles"), created.get("roles"));
    assert_eq!(stored.get("registered"), created.get("registered"));
}

#[rstest]
#[actix_web::test]
async fn update_rejects_empty_roles() {
    let app = actix_test::init_service(users_app()).await;
    send(&app, create("Ada", "ada@example.com")).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::put().uri("/api/v1/users/1").set_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "roles": [],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("user must hold at least one role")
    );
}

#[rstest]
#[actix_web::test]
async fn delete_then_lookup_is_not_found() {
    let app = actix_test::init_service(users_app()).await;
    send(&app, create("Ada", "ada@example.com")).await;

    let (status, _) = send(&app, actix_test::TestRequest::delete().uri("/api/v1/users/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, actix_test::TestRequest::delete().uri("/api/v1/users/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
