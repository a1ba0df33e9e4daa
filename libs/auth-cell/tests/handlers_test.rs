use std::sync::Arc;

use axum::extract::{Extension, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_cell::handlers::*;
use auth_cell::models::{ForgotPasswordRequest, LoginRequest};
use auth_cell::services::password::hash_password;
use shared_database::AppState;
use shared_models::error::AppError;
use shared_utils::jwt::validate_token;
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

async fn state_for(mock_server: &MockServer) -> Arc<AppState> {
    TestConfig::with_store_url(&mock_server.uri()).to_state()
}

fn account_row(id: i64, email: &str, password: &str) -> serde_json::Value {
    json!({
        "id": id,
        "first_name": "Dana",
        "last_name": "Osei",
        "email": email,
        "password_hash": hash_password(password).unwrap(),
        "role": "radiologist",
        "department_id": 3,
        "is_active": true,
        "last_login": null,
        "created_at": "2026-01-15T09:00:00Z",
        "updated_at": "2026-01-15T09:00:00Z"
    })
}

async fn mock_account_lookup(mock_server: &MockServer, email: &str, rows: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/staff_users"))
        .and(query_param("email", format!("eq.{}", email)))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(mock_server)
        .await;
}

fn login_request(email: &str, password: &str) -> LoginRequest {
    serde_json::from_value(json!({ "email": email, "password": password })).unwrap()
}

#[tokio::test]
async fn login_returns_bearer_token_and_stamps_last_login() {
    let mock_server = MockServer::start().await;
    mock_account_lookup(
        &mock_server,
        "dana@hospital.test",
        json!([account_row(1, "dana@hospital.test", "correct horse")]),
    )
    .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/staff_users"))
        .and(query_param("id", "eq.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let secret = state.config.jwt_secret.clone();
    let result = login(
        State(state),
        Json(login_request("dana@hospital.test", "correct horse")),
    )
    .await;

    let Json(body) = result.expect("valid credentials must log in");
    assert_eq!(body.token_type, "bearer");
    assert!(body.user.last_login.is_some());

    let claims = validate_token(&body.access_token, &secret).unwrap();
    assert_eq!(claims.id, 1);
    assert_eq!(claims.role, "radiologist");
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let mock_server = MockServer::start().await;
    mock_account_lookup(
        &mock_server,
        "dana@hospital.test",
        json!([account_row(1, "dana@hospital.test", "correct horse")]),
    )
    .await;

    let state = state_for(&mock_server).await;
    let result = login(
        State(state),
        Json(login_request("dana@hospital.test", "battery staple")),
    )
    .await;

    let err = result.err().expect("wrong password must be rejected");
    assert!(matches!(err, AppError::Auth(_)));
}

#[tokio::test]
async fn login_failure_message_does_not_reveal_account_existence() {
    let mock_server = MockServer::start().await;
    mock_account_lookup(
        &mock_server,
        "dana@hospital.test",
        json!([account_row(1, "dana@hospital.test", "correct horse")]),
    )
    .await;
    mock_account_lookup(&mock_server, "ghost@hospital.test", json!([])).await;

    let state = state_for(&mock_server).await;

    let wrong_password = login(
        State(state.clone()),
        Json(login_request("dana@hospital.test", "battery staple")),
    )
    .await
    .err()
    .unwrap();
    let unknown_email = login(
        State(state),
        Json(login_request("ghost@hospital.test", "anything")),
    )
    .await
    .err()
    .unwrap();

    // Both paths must produce the identical error.
    let (AppError::Auth(a), AppError::Auth(b)) = (wrong_password, unknown_email) else {
        panic!("both failures must map to an auth error");
    };
    assert_eq!(a, b);
}

#[tokio::test]
async fn verify_accepts_current_token() {
    let mock_server = MockServer::start().await;
    let state = state_for(&mock_server).await;

    let user = TestUser::radiologist(9);
    let token = JwtTestUtils::create_test_token(&user, &state.config.jwt_secret, Some(1));

    let mut headers = HeaderMap::new();
    headers.insert("Authorization", format!("Bearer {}", token).parse().unwrap());

    let Json(verification) = verify_token(State(state), headers).await.unwrap();
    assert!(verification.valid);
    assert_eq!(verification.user_id, 9);
    assert_eq!(verification.role, "radiologist");
}

#[tokio::test]
async fn verify_rejects_expired_token() {
    let mock_server = MockServer::start().await;
    let state = state_for(&mock_server).await;

    let user = TestUser::default();
    let token = JwtTestUtils::create_expired_token(&user, &state.config.jwt_secret);

    let mut headers = HeaderMap::new();
    headers.insert("Authorization", format!("Bearer {}", token).parse().unwrap());

    let err = verify_token(State(state), headers).await.err().unwrap();
    assert!(matches!(err, AppError::Auth(_)));
}

#[tokio::test]
async fn verify_rejects_missing_header() {
    let mock_server = MockServer::start().await;
    let state = state_for(&mock_server).await;

    let err = verify_token(State(state), HeaderMap::new()).await.err().unwrap();
    assert!(matches!(err, AppError::Auth(_)));
}

#[tokio::test]
async fn me_returns_the_authenticated_account() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/staff_users"))
        .and(query_param("id", "eq.5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([account_row(5, "dana@hospital.test", "correct horse")])),
        )
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let user = TestUser::new(5, "dana@hospital.test", "radiologist").to_auth_user();

    let Json(body) = me(State(state), Extension(user)).await.unwrap();
    assert_eq!(body["id"], 5);
    assert_eq!(body["email"], "dana@hospital.test");
    // The hash must never serialize into a response.
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn forgot_password_is_neutral_for_unknown_email() {
    let mock_server = MockServer::start().await;
    mock_account_lookup(&mock_server, "ghost@hospital.test", json!([])).await;

    let state = state_for(&mock_server).await;
    let request: ForgotPasswordRequest =
        serde_json::from_value(json!({ "email": "ghost@hospital.test" })).unwrap();

    let Json(body) = forgot_password(State(state), Json(request))
        .await
        .expect("unknown email must not error");
    assert!(body["message"].as_str().unwrap().contains("If your email is registered"));
}
