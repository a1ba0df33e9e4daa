use std::sync::Arc;

use axum::extract::{Extension, Path, State};
use axum::Json;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use document_cell::handlers::*;
use document_cell::models::{CreateVersionRequest, ShareDocumentRequest};
use shared_database::AppState;
use shared_models::error::AppError;
use shared_utils::test_utils::{TestConfig, TestUser};

async fn state_for(mock_server: &MockServer) -> Arc<AppState> {
    TestConfig::with_store_url(&mock_server.uri()).to_state()
}

fn document_row(id: i64, version: i32) -> serde_json::Value {
    json!({
        "id": id,
        "title": "MRI Safety Checklist",
        "description": null,
        "category": "policy",
        "department_id": 3,
        "created_by": 2,
        "storage_path": format!("documents/{}/v{}.pdf", id, version),
        "content_type": "application/pdf",
        "tags": ["safety", "mri"],
        "is_public": false,
        "status": "active",
        "version": version,
        "expires_at": null,
        "created_at": "2026-01-20T09:00:00Z",
        "updated_at": "2026-01-20T09:00:00Z"
    })
}

fn version_row(id: i64, document_id: i64, version: i32) -> serde_json::Value {
    json!({
        "id": id,
        "document_id": document_id,
        "version": version,
        "storage_path": format!("documents/{}/v{}.pdf", document_id, version),
        "uploaded_by": 9,
        "notes": "updated signage section",
        "created_at": "2026-04-01T10:00:00Z"
    })
}

fn share_row(id: i64, document_id: i64, shared_by: i64, shared_with: i64) -> serde_json::Value {
    json!({
        "id": id,
        "document_id": document_id,
        "shared_by": shared_by,
        "shared_with": shared_with,
        "permission": "view",
        "is_active": true,
        "created_at": "2026-04-01T10:00:00Z"
    })
}

#[tokio::test]
async fn new_version_bumps_the_parent_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/documents"))
        .and(query_param("id", "eq.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([document_row(7, 2)])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/document_versions"))
        .and(body_partial_json(json!({ "document_id": 7, "version": 3, "uploaded_by": 9 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([version_row(31, 7, 3)])))
        .expect(1)
        .mount(&mock_server)
        .await;

    // The parent row must be brought up to the new version.
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/documents"))
        .and(query_param("id", "eq.7"))
        .and(body_partial_json(json!({ "version": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([document_row(7, 3)])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let uploader = TestUser::radiologist(9).to_auth_user();
    let request: CreateVersionRequest = serde_json::from_value(json!({
        "storage_path": "documents/7/v3.pdf",
        "notes": "updated signage section"
    }))
    .unwrap();

    let Json(body) = create_document_version(State(state), Extension(uploader), Path(7), Json(request))
        .await
        .expect("versioning an existing document must succeed");

    assert_eq!(body["version"], 3);
    assert_eq!(body["uploaded_by"], 9);
}

#[tokio::test]
async fn versioning_a_missing_document_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/documents"))
        .and(query_param("id", "eq.999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let uploader = TestUser::radiologist(9).to_auth_user();
    let request: CreateVersionRequest =
        serde_json::from_value(json!({ "storage_path": "documents/999/v1.pdf" })).unwrap();

    let err = create_document_version(State(state), Extension(uploader), Path(999), Json(request))
        .await
        .err()
        .expect("missing document must 404");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn share_defaults_to_view_permission_and_records_sharer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/documents"))
        .and(query_param("id", "eq.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([document_row(7, 2)])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/document_shares"))
        .and(body_partial_json(json!({
            "document_id": 7,
            "shared_by": 9,
            "shared_with": 4,
            "permission": "view",
            "is_active": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([share_row(11, 7, 9, 4)])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let sharer = TestUser::radiologist(9).to_auth_user();
    let request: ShareDocumentRequest =
        serde_json::from_value(json!({ "shared_with": 4 })).unwrap();

    let Json(body) = share_document(State(state), Extension(sharer), Path(7), Json(request))
        .await
        .unwrap();

    assert_eq!(body["permission"], "view");
    assert_eq!(body["shared_by"], 9);
}

#[tokio::test]
async fn sharing_a_missing_document_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/documents"))
        .and(query_param("id", "eq.999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let sharer = TestUser::radiologist(9).to_auth_user();
    let request: ShareDocumentRequest =
        serde_json::from_value(json!({ "shared_with": 4 })).unwrap();

    let err = share_document(State(state), Extension(sharer), Path(999), Json(request))
        .await
        .err()
        .expect("missing document must 404");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn shared_with_me_resolves_documents_behind_active_shares() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/document_shares"))
        .and(query_param("shared_with", "eq.9"))
        .and(query_param("is_active", "eq.true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            share_row(11, 7, 2, 9),
            share_row(12, 8, 2, 9)
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/documents"))
        .and(query_param("id", "in.(7,8)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            document_row(7, 2),
            document_row(8, 1)
        ])))
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let user = TestUser::radiologist(9).to_auth_user();

    let Json(body) = get_shared_with_me(State(state), Extension(user)).await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn shared_with_me_is_empty_without_shares() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/document_shares"))
        .and(query_param("shared_with", "eq.9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let user = TestUser::radiologist(9).to_auth_user();

    let Json(body) = get_shared_with_me(State(state), Extension(user)).await.unwrap();
    assert!(body.as_array().unwrap().is_empty());
}
