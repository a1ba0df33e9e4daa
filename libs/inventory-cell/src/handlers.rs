use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::auth::AuthUser;
use shared_models::error::AppError;

use crate::models::{
    AlertQuery, CreateAlertRequest, CreateSupplyRequest, CreateTransactionRequest, SupplyQuery,
    TransactionQuery, UpdateSupplyRequest,
};
use crate::services::{AlertService, SupplyService, TransactionService};

// --- Supplies ---

#[axum::debug_handler]
pub async fn create_supply(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateSupplyRequest>,
) -> Result<Json<Value>, AppError> {
    let service = SupplyService::new(&state);

    let supply = service.create_supply(request).await?;

    Ok(Json(json!(supply)))
}

#[axum::debug_handler]
pub async fn get_supply(
    State(state): State<Arc<AppState>>,
    Path(supply_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = SupplyService::new(&state);

    let supply = service.get_supply(supply_id).await?;

    Ok(Json(json!(supply)))
}

#[axum::debug_handler]
pub async fn list_supplies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SupplyQuery>,
) -> Result<Json<Value>, AppError> {
    let service = SupplyService::new(&state);

    let supplies = service.list_supplies(query).await?;

    Ok(Json(json!(supplies)))
}

#[axum::debug_handler]
pub async fn update_supply(
    State(state): State<Arc<AppState>>,
    Path(supply_id): Path<i64>,
    Json(request): Json<UpdateSupplyRequest>,
) -> Result<Json<Value>, AppError> {
    let service = SupplyService::new(&state);

    let supply = service.update_supply(supply_id, request).await?;

    Ok(Json(json!(supply)))
}

#[axum::debug_handler]
pub async fn delete_supply(
    State(state): State<Arc<AppState>>,
    Path(supply_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = SupplyService::new(&state);

    service.delete_supply(supply_id).await?;

    Ok(Json(json!({ "message": "Supply deleted successfully" })))
}

#[axum::debug_handler]
pub async fn get_low_stock_supplies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let service = SupplyService::new(&state);

    let supplies = service.get_low_stock_supplies().await?;

    Ok(Json(json!(supplies)))
}

#[axum::debug_handler]
pub async fn get_expiring_supplies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let service = SupplyService::new(&state);

    let supplies = service.get_expiring_supplies().await?;

    Ok(Json(json!(supplies)))
}

#[axum::debug_handler]
pub async fn get_department_supplies(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = SupplyService::new(&state);

    let supplies = service.get_department_supplies(department_id).await?;

    Ok(Json(json!(supplies)))
}

// --- Transactions ---

#[axum::debug_handler]
pub async fn post_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<Json<Value>, AppError> {
    let service = TransactionService::new(&state);

    let transaction = service.post_transaction(request, user.id).await?;

    Ok(Json(json!(transaction)))
}

#[axum::debug_handler]
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TransactionQuery>,
) -> Result<Json<Value>, AppError> {
    let service = TransactionService::new(&state);

    let transactions = service.list_transactions(query).await?;

    Ok(Json(json!(transactions)))
}

// --- Alerts ---

#[axum::debug_handler]
pub async fn create_alert(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAlertRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AlertService::new(&state);

    let alert = service.create_alert(request).await?;

    Ok(Json(json!(alert)))
}

#[axum::debug_handler]
pub async fn list_alerts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AlertQuery>,
) -> Result<Json<Value>, AppError> {
    let service = AlertService::new(&state);

    let alerts = service.list_alerts(query).await?;

    Ok(Json(json!(alerts)))
}

#[axum::debug_handler]
pub async fn acknowledge_alert(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(alert_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = AlertService::new(&state);

    let alert = service.acknowledge_alert(alert_id, user.id).await?;

    Ok(Json(json!(alert)))
}
