use std::sync::Arc;

use axum::extract::{Extension, Path, State};
use axum::Json;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_database::AppState;
use shared_models::error::AppError;
use shared_utils::test_utils::{TestConfig, TestUser};
use study_cell::handlers::*;
use study_cell::models::UpdateAnnotationRequest;

async fn state_for(mock_server: &MockServer) -> Arc<AppState> {
    TestConfig::with_store_url(&mock_server.uri()).to_state()
}

fn report_row(id: i64, status: &str, signed_by: Option<i64>) -> serde_json::Value {
    json!({
        "id": id,
        "study_id": 20,
        "patient_id": 30,
        "radiologist_id": 9,
        "findings": "No acute abnormality",
        "impression": "Normal chest CT",
        "recommendations": null,
        "status": status,
        "critical_findings": false,
        "signed_by": signed_by,
        "signed_at": signed_by.map(|_| "2026-04-01T10:00:00Z"),
        "created_at": "2026-03-28T09:00:00Z",
        "updated_at": "2026-04-01T10:00:00Z"
    })
}

fn annotation_row(id: i64, version: i32, reviewed_by: Option<i64>) -> serde_json::Value {
    json!({
        "id": id,
        "study_id": 20,
        "image_id": "series-2/image-14",
        "created_by": 4,
        "type": "measurement",
        "data": { "length_mm": 12.5 },
        "status": if reviewed_by.is_some() { "approved" } else { "pending" },
        "notes": null,
        "version": version,
        "is_ai_generated": true,
        "reviewed_by": reviewed_by,
        "reviewed_at": reviewed_by.map(|_| "2026-04-01T11:00:00Z"),
        "created_at": "2026-03-30T08:00:00Z",
        "updated_at": "2026-04-01T11:00:00Z"
    })
}

fn protocol_row(id: i64, created_by: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": "CT Chest w/ Contrast",
        "category": "ct",
        "equipment_type": "ct_scanner",
        "department_id": 3,
        "body": { "kvp": 120, "contrast": "iv" },
        "version": 2,
        "is_active": true,
        "created_by": created_by,
        "updated_by": null,
        "created_at": "2026-02-10T09:00:00Z",
        "updated_at": "2026-02-10T09:00:00Z"
    })
}

#[tokio::test]
async fn signing_stamps_signer_and_finalizes_the_report() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/radiology_reports"))
        .and(query_param("id", "eq.5"))
        .and(body_partial_json(json!({ "status": "final", "signed_by": 9 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([report_row(5, "final", Some(9))])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let radiologist = TestUser::radiologist(9).to_auth_user();

    let Json(body) = sign_report(State(state), Extension(radiologist), Path(5))
        .await
        .expect("signing an existing report must succeed");

    assert_eq!(body["status"], "final");
    assert_eq!(body["signed_by"], 9);
    assert!(!body["signed_at"].is_null());
}

#[tokio::test]
async fn signing_a_missing_report_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/radiology_reports"))
        .and(query_param("id", "eq.999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let radiologist = TestUser::radiologist(9).to_auth_user();

    let err = sign_report(State(state), Extension(radiologist), Path(999))
        .await
        .err()
        .expect("missing report must 404");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn review_records_reviewer_and_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/image_annotations"))
        .and(query_param("id", "eq.3"))
        .and(body_partial_json(json!({ "status": "approved", "reviewed_by": 9 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([annotation_row(3, 2, Some(9))])),
        )
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let radiologist = TestUser::radiologist(9).to_auth_user();
    let request = serde_json::from_value(json!({ "status": "approved" })).unwrap();

    let Json(body) = review_annotation(State(state), Extension(radiologist), Path(3), Json(request))
        .await
        .unwrap();

    assert_eq!(body["status"], "approved");
    assert_eq!(body["reviewed_by"], 9);
    assert!(!body["reviewed_at"].is_null());
}

#[tokio::test]
async fn content_update_bumps_annotation_version() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/image_annotations"))
        .and(query_param("id", "eq.3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([annotation_row(3, 2, None)])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/image_annotations"))
        .and(query_param("id", "eq.3"))
        .and(body_partial_json(json!({ "version": 3 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([annotation_row(3, 3, None)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let request: UpdateAnnotationRequest =
        serde_json::from_value(json!({ "notes": "re-measured" })).unwrap();

    let Json(body) = update_annotation(State(state), Path(3), Json(request)).await.unwrap();
    assert_eq!(body["version"], 3);
}

#[tokio::test]
async fn duplicate_copies_template_and_records_duplicating_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/protocol_templates"))
        .and(query_param("id", "eq.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([protocol_row(4, 2)])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/protocol_templates"))
        .and(body_partial_json(json!({
            "name": "CT Chest w/ Contrast",
            "category": "ct",
            "created_by": 9
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([protocol_row(10, 9)])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let radiologist = TestUser::radiologist(9).to_auth_user();

    let Json(body) = duplicate_protocol(State(state), Extension(radiologist), Path(4))
        .await
        .expect("duplicating an existing template must succeed");

    assert_eq!(body["id"], 10);
    assert_eq!(body["created_by"], 9);
    assert_eq!(body["name"], "CT Chest w/ Contrast");
}

#[tokio::test]
async fn duplicate_of_missing_template_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/protocol_templates"))
        .and(query_param("id", "eq.404"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let radiologist = TestUser::radiologist(9).to_auth_user();

    let err = duplicate_protocol(State(state), Extension(radiologist), Path(404))
        .await
        .err()
        .expect("missing template must 404");
    assert!(matches!(err, AppError::NotFound(_)));
}
