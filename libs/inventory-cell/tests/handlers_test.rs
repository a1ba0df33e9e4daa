use std::sync::Arc;

use axum::extract::{Extension, Path, State};
use axum::Json;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use inventory_cell::handlers::*;
use inventory_cell::models::{CreateSupplyRequest, CreateTransactionRequest};
use shared_database::AppState;
use shared_models::auth::AuthUser;
use shared_models::error::AppError;
use shared_utils::test_utils::{TestConfig, TestUser};

async fn state_for(mock_server: &MockServer) -> Arc<AppState> {
    TestConfig::with_store_url(&mock_server.uri()).to_state()
}

fn auth_user() -> Extension<AuthUser> {
    Extension(TestUser::technologist(5).to_auth_user())
}

fn supply_row(id: i64, quantity: i64, minimum: i64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Contrast agent",
        "category": "consumable",
        "department_id": 3,
        "current_quantity": quantity,
        "minimum_quantity": minimum,
        "maximum_quantity": 100,
        "unit": "vial",
        "unit_cost": 12.5,
        "expiration_date": "2027-01-01",
        "status": status,
        "location": "Shelf B2",
        "created_at": "2026-02-01T08:00:00Z",
        "updated_at": "2026-02-01T08:00:00Z"
    })
}

fn transaction_row(id: i64, supply_id: i64, kind: &str, quantity: i64) -> serde_json::Value {
    json!({
        "id": id,
        "supply_id": supply_id,
        "transaction_type": kind,
        "quantity": quantity,
        "department_id": 3,
        "performed_by": 5,
        "transaction_date": "2026-02-10T09:00:00Z",
        "notes": null,
        "created_at": "2026-02-10T09:00:00Z",
        "updated_at": "2026-02-10T09:00:00Z"
    })
}

async fn mock_supply_fetch(mock_server: &MockServer, row: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/supplies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row])))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn issuing_more_than_on_hand_fails_and_writes_nothing() {
    let mock_server = MockServer::start().await;
    mock_supply_fetch(&mock_server, supply_row(1, 5, 10, "low_stock")).await;

    // The ledger must reject before any write happens.
    Mock::given(method("POST"))
        .and(path("/rest/v1/inventory_transactions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/supplies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let request: CreateTransactionRequest = serde_json::from_value(json!({
        "supply_id": 1,
        "transaction_type": "issued",
        "quantity": 6
    }))
    .unwrap();

    let result = post_transaction(State(state), auth_user(), Json(request)).await;

    let err = result.err().expect("over-issue must be rejected");
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn receiving_updates_quantity_and_status() {
    let mock_server = MockServer::start().await;
    mock_supply_fetch(&mock_server, supply_row(1, 0, 5, "out_of_stock")).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/inventory_transactions"))
        .and(body_partial_json(json!({
            "supply_id": 1,
            "transaction_type": "received",
            "quantity": 10,
            "performed_by": 5
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([transaction_row(99, 1, "received", 10)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/supplies"))
        .and(query_param("id", "eq.1"))
        .and(body_partial_json(json!({
            "current_quantity": 10,
            "status": "in_stock"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([supply_row(1, 10, 5, "in_stock")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let request: CreateTransactionRequest = serde_json::from_value(json!({
        "supply_id": 1,
        "transaction_type": "received",
        "quantity": 10,
        "department_id": 3
    }))
    .unwrap();

    let Json(body) = post_transaction(State(state), auth_user(), Json(request))
        .await
        .expect("receive must succeed");

    assert_eq!(body["id"], 99);
    assert_eq!(body["transaction_type"], "received");
}

#[tokio::test]
async fn posting_against_missing_supply_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/supplies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let request: CreateTransactionRequest = serde_json::from_value(json!({
        "supply_id": 404,
        "transaction_type": "received",
        "quantity": 1
    }))
    .unwrap();

    let result = post_transaction(State(state), auth_user(), Json(request)).await;

    let err = result.err().expect("missing supply must 404");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn create_supply_derives_status_instead_of_trusting_client() {
    let mock_server = MockServer::start().await;

    // Quantity 5 with minimum 10 must land as low_stock.
    Mock::given(method("POST"))
        .and(path("/rest/v1/supplies"))
        .and(body_partial_json(json!({ "status": "low_stock" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!([supply_row(7, 5, 10, "low_stock")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;
    let request: CreateSupplyRequest = serde_json::from_value(json!({
        "name": "Contrast agent",
        "category": "consumable",
        "department_id": 3,
        "current_quantity": 5,
        "minimum_quantity": 10,
        "maximum_quantity": 100,
        "unit": "vial"
    }))
    .unwrap();

    let Json(body) = create_supply(State(state), Json(request)).await.unwrap();
    assert_eq!(body["status"], "low_stock");
}

#[tokio::test]
async fn acknowledging_alert_stamps_caller_and_deactivates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/inventory_alerts"))
        .and(query_param("id", "eq.12"))
        .and(body_partial_json(json!({
            "is_active": false,
            "acknowledged_by": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 12,
            "supply_id": 1,
            "alert_type": "low_stock",
            "message": "Contrast agent below minimum",
            "is_active": false,
            "acknowledged_at": "2026-02-10T09:00:00Z",
            "acknowledged_by": 5,
            "created_at": "2026-02-09T00:00:00Z",
            "updated_at": "2026-02-10T09:00:00Z"
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = state_for(&mock_server).await;

    let Json(body) = acknowledge_alert(State(state), auth_user(), Path(12))
        .await
        .unwrap();

    assert_eq!(body["is_active"], false);
    assert_eq!(body["acknowledged_by"], 5);
}
