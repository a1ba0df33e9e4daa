use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{
    CreateEquipmentRequest, CreateMaintenanceRequest, CreateQualityControlRequest, EquipmentQuery,
    MaintenanceQuery, QualityControlQuery, UpcomingMaintenanceQuery, UpdateEquipmentRequest,
    UpdateMaintenanceRequest, UpdateQualityControlRequest,
};
use crate::services::{EquipmentService, MaintenanceService, QualityControlService};

// --- Equipment ---

#[axum::debug_handler]
pub async fn create_equipment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateEquipmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = EquipmentService::new(&state);

    let equipment = service.create_equipment(request).await?;

    Ok(Json(json!(equipment)))
}

#[axum::debug_handler]
pub async fn get_equipment(
    State(state): State<Arc<AppState>>,
    Path(equipment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = EquipmentService::new(&state);

    let equipment = service.get_equipment(equipment_id).await?;

    Ok(Json(json!(equipment)))
}

#[axum::debug_handler]
pub async fn get_equipment_by_serial(
    State(state): State<Arc<AppState>>,
    Path(serial): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = EquipmentService::new(&state);

    let equipment = service.get_equipment_by_serial(&serial).await?;

    Ok(Json(json!(equipment)))
}

#[axum::debug_handler]
pub async fn list_equipment(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EquipmentQuery>,
) -> Result<Json<Value>, AppError> {
    let service = EquipmentService::new(&state);

    let equipment = service.list_equipment(query).await?;

    Ok(Json(json!(equipment)))
}

#[axum::debug_handler]
pub async fn get_equipment_needing_maintenance(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let service = EquipmentService::new(&state);

    let equipment = service.get_equipment_needing_maintenance().await?;

    Ok(Json(json!(equipment)))
}

#[axum::debug_handler]
pub async fn get_equipment_by_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = EquipmentService::new(&state);

    let equipment = service.get_equipment_by_room(room_id).await?;

    Ok(Json(json!(equipment)))
}

#[axum::debug_handler]
pub async fn update_equipment(
    State(state): State<Arc<AppState>>,
    Path(equipment_id): Path<i64>,
    Json(request): Json<UpdateEquipmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = EquipmentService::new(&state);

    let equipment = service.update_equipment(equipment_id, request).await?;

    Ok(Json(json!(equipment)))
}

#[axum::debug_handler]
pub async fn delete_equipment(
    State(state): State<Arc<AppState>>,
    Path(equipment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = EquipmentService::new(&state);

    service.delete_equipment(equipment_id).await?;

    Ok(Json(json!({ "message": "Equipment deleted successfully" })))
}

// --- Maintenance records ---

#[axum::debug_handler]
pub async fn create_maintenance_record(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateMaintenanceRequest>,
) -> Result<Json<Value>, AppError> {
    let service = MaintenanceService::new(&state);

    let record = service.create_record(request).await?;

    Ok(Json(json!(record)))
}

#[axum::debug_handler]
pub async fn get_maintenance_record(
    State(state): State<Arc<AppState>>,
    Path(record_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = MaintenanceService::new(&state);

    let record = service.get_record(record_id).await?;

    Ok(Json(json!(record)))
}

#[axum::debug_handler]
pub async fn list_maintenance_records(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MaintenanceQuery>,
) -> Result<Json<Value>, AppError> {
    let service = MaintenanceService::new(&state);

    let records = service.list_records(query).await?;

    Ok(Json(json!(records)))
}

#[axum::debug_handler]
pub async fn get_upcoming_maintenance(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UpcomingMaintenanceQuery>,
) -> Result<Json<Value>, AppError> {
    let service = MaintenanceService::new(&state);

    let records = service
        .get_upcoming_maintenance(query.days_ahead.unwrap_or(30))
        .await?;

    Ok(Json(json!(records)))
}

#[axum::debug_handler]
pub async fn update_maintenance_record(
    State(state): State<Arc<AppState>>,
    Path(record_id): Path<i64>,
    Json(request): Json<UpdateMaintenanceRequest>,
) -> Result<Json<Value>, AppError> {
    let service = MaintenanceService::new(&state);

    let record = service.update_record(record_id, request).await?;

    Ok(Json(json!(record)))
}

#[axum::debug_handler]
pub async fn delete_maintenance_record(
    State(state): State<Arc<AppState>>,
    Path(record_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = MaintenanceService::new(&state);

    service.delete_record(record_id).await?;

    Ok(Json(json!({ "message": "Maintenance record deleted successfully" })))
}

// --- Quality control ---

#[axum::debug_handler]
pub async fn create_quality_control(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateQualityControlRequest>,
) -> Result<Json<Value>, AppError> {
    let service = QualityControlService::new(&state);

    let check = service.create_check(request).await?;

    Ok(Json(json!(check)))
}

#[axum::debug_handler]
pub async fn get_quality_control(
    State(state): State<Arc<AppState>>,
    Path(check_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = QualityControlService::new(&state);

    let check = service.get_check(check_id).await?;

    Ok(Json(json!(check)))
}

#[axum::debug_handler]
pub async fn list_quality_controls(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QualityControlQuery>,
) -> Result<Json<Value>, AppError> {
    let service = QualityControlService::new(&state);

    let checks = service.list_checks(query).await?;

    Ok(Json(json!(checks)))
}

#[axum::debug_handler]
pub async fn get_quality_controls_for_study(
    State(state): State<Arc<AppState>>,
    Path(study_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = QualityControlService::new(&state);

    let checks = service.get_checks_for_study(study_id).await?;

    Ok(Json(json!(checks)))
}

#[axum::debug_handler]
pub async fn get_quality_controls_for_equipment(
    State(state): State<Arc<AppState>>,
    Path(equipment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = QualityControlService::new(&state);

    let checks = service.get_checks_for_equipment(equipment_id).await?;

    Ok(Json(json!(checks)))
}

#[axum::debug_handler]
pub async fn get_quality_controls_for_report(
    State(state): State<Arc<AppState>>,
    Path(report_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = QualityControlService::new(&state);

    let checks = service.get_checks_for_report(report_id).await?;

    Ok(Json(json!(checks)))
}

#[axum::debug_handler]
pub async fn get_pending_quality_controls(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let service = QualityControlService::new(&state);

    let checks = service.get_pending_checks().await?;

    Ok(Json(json!(checks)))
}

#[axum::debug_handler]
pub async fn get_needs_review_quality_controls(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let service = QualityControlService::new(&state);

    let checks = service.get_needs_review_checks().await?;

    Ok(Json(json!(checks)))
}

#[axum::debug_handler]
pub async fn update_quality_control(
    State(state): State<Arc<AppState>>,
    Path(check_id): Path<i64>,
    Json(request): Json<UpdateQualityControlRequest>,
) -> Result<Json<Value>, AppError> {
    let service = QualityControlService::new(&state);

    let check = service.update_check(check_id, request).await?;

    Ok(Json(json!(check)))
}

#[axum::debug_handler]
pub async fn delete_quality_control(
    State(state): State<Arc<AppState>>,
    Path(check_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = QualityControlService::new(&state);

    service.delete_check(check_id).await?;

    Ok(Json(json!({ "message": "Quality control record deleted successfully" })))
}
