use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use schedule_cell::handlers::*;
use schedule_cell::models::{ConflictCheckQuery, ScheduleRequest};
use shared_database::AppState;
use shared_models::error::AppError;
use shared_utils::test_utils::TestConfig;

async fn state_for(mock_server: &MockServer) -> Arc<AppState> {
    TestConfig::with_store_url(&mock_server.uri()).to_state()
}

fn schedule_row(id: i64, staff_id: i64, start: &str, end: &str) -> serde_json::Value {
    json!({
        "id": id,
        "staff_id": staff_id,
        "department_id": 2,
        "date": "2026-03-02",
        "start_time": start,
        "end_time": end,
        "shift_type": "morning",
        "status": "scheduled",
        "notes": null,
        "created_at": "2026-02-01T08:00:00Z",
        "updated_at": "2026-02-01T08:00:00Z"
    })
}

fn request(staff_id: i64, start: &str, end: &str) -> ScheduleRequest {
    serde_json::from_value(json!({
        "staff_id": staff_id,
        "department_id": 2,
        "date": "2026-03-02",
        "start_time": start,
        "end_time": end,
        "shift_type": "morning",
        "status": "scheduled"
    }))
    .unwrap()
}

async fn mock_existing_day(mock_server: &MockServer, staff_id: i64, rows: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/schedules"))
        .and(query_param("staff_id", format!("eq.{}", staff_id)))
        .and(query_param("date", "eq.2026-03-02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn create_rejects_overlapping_booking() {
    let mock_server = MockServer::start().await;
    mock_existing_day(&mock_server, 7, json!([schedule_row(1, 7, "09:00:00", "12:00:00")])).await;

    let state = state_for(&mock_server).await;
    let result = create_schedule(State(state), Json(request(7, "10:00:00", "11:00:00"))).await;

    let err = result.err().expect("overlap must be rejected");
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn create_allows_touching_booking() {
    let mock_server = MockServer::start().await;
    mock_existing_day(&mock_server, 7, json!([schedule_row(1, 7, "09:00:00", "10:00:00")])).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/schedules"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([schedule_row(2, 7, "10:00:00", "11:00:00")])),
        )
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let result = create_schedule(State(state), Json(request(7, "10:00:00", "11:00:00"))).await;

    let Json(body) = result.expect("touching intervals must not conflict");
    assert_eq!(body["id"], 2);
    assert_eq!(body["start_time"], "10:00:00");
}

#[tokio::test]
async fn create_rejects_inverted_time_range() {
    let mock_server = MockServer::start().await;
    let state = state_for(&mock_server).await;

    let result = create_schedule(State(state), Json(request(7, "11:00:00", "10:00:00"))).await;

    let err = result.err().expect("inverted range must be rejected");
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn update_excludes_own_booking_from_conflict_check() {
    let mock_server = MockServer::start().await;
    // The only booking on the day is the one being updated.
    mock_existing_day(&mock_server, 7, json!([schedule_row(42, 7, "09:00:00", "10:00:00")])).await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/schedules"))
        .and(query_param("id", "eq.42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([schedule_row(42, 7, "09:00:00", "10:00:00")])),
        )
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let result = update_schedule(
        State(state),
        Path(42),
        Json(request(7, "09:00:00", "10:00:00")),
    )
    .await;

    let Json(body) = result.expect("reschedule in place must not conflict with itself");
    assert_eq!(body["id"], 42);
}

#[tokio::test]
async fn conflict_check_reports_containment() {
    let mock_server = MockServer::start().await;
    mock_existing_day(&mock_server, 7, json!([schedule_row(1, 7, "09:00:00", "12:00:00")])).await;

    let state = state_for(&mock_server).await;
    let query: ConflictCheckQuery = serde_json::from_value(json!({
        "staff_id": 7,
        "date": "2026-03-02",
        "start_time": "10:00:00",
        "end_time": "11:00:00"
    }))
    .unwrap();

    let Json(body) = check_conflict(State(state), Query(query)).await.unwrap();
    assert_eq!(body["conflict"], true);
}

#[tokio::test]
async fn delete_missing_schedule_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/schedules"))
        .and(query_param("id", "eq.999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let result = delete_schedule(State(state), Path(999)).await;

    let err = result.err().expect("missing schedule must 404");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn list_passes_filters_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/schedules"))
        .and(query_param("status", "eq.scheduled"))
        .and(query_param("limit", "100"))
        .and(query_param("offset", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([schedule_row(1, 7, "09:00:00", "10:00:00")])),
        )
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let query = serde_json::from_value(json!({ "status": "scheduled" })).unwrap();

    let Json(body) = list_schedules(State(state), Query(query)).await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
}
