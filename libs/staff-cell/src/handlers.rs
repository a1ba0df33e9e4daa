use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{
    CreateStaffUserRequest, CreateTechnologistRequest, StaffQuery, TechnologistQuery,
    UpdateStaffUserRequest, UpdateTechnologistRequest,
};
use crate::services::{StaffService, TechnologistService};

// --- Staff users ---

#[axum::debug_handler]
pub async fn create_staff_user(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateStaffUserRequest>,
) -> Result<Json<Value>, AppError> {
    let service = StaffService::new(&state);

    let user = service.create_staff_user(request).await?;

    Ok(Json(json!(user)))
}

#[axum::debug_handler]
pub async fn get_staff_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = StaffService::new(&state);

    let user = service.get_staff_user(user_id).await?;

    Ok(Json(json!(user)))
}

#[axum::debug_handler]
pub async fn list_staff_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StaffQuery>,
) -> Result<Json<Value>, AppError> {
    let service = StaffService::new(&state);

    let users = service.list_staff_users(query).await?;

    Ok(Json(json!(users)))
}

#[axum::debug_handler]
pub async fn update_staff_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateStaffUserRequest>,
) -> Result<Json<Value>, AppError> {
    let service = StaffService::new(&state);

    let user = service.update_staff_user(user_id, request).await?;

    Ok(Json(json!(user)))
}

#[axum::debug_handler]
pub async fn delete_staff_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = StaffService::new(&state);

    service.delete_staff_user(user_id).await?;

    Ok(Json(json!({ "message": "Staff user deleted successfully" })))
}

#[axum::debug_handler]
pub async fn get_staff_by_role(
    State(state): State<Arc<AppState>>,
    Path(role): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = StaffService::new(&state);

    let users = service.get_staff_by_role(&role).await?;

    Ok(Json(json!(users)))
}

// --- Technologists ---

#[axum::debug_handler]
pub async fn create_technologist(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateTechnologistRequest>,
) -> Result<Json<Value>, AppError> {
    let service = TechnologistService::new(&state);

    let technologist = service.create_technologist(request).await?;

    Ok(Json(json!(technologist)))
}

#[axum::debug_handler]
pub async fn get_technologist(
    State(state): State<Arc<AppState>>,
    Path(technologist_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = TechnologistService::new(&state);

    let technologist = service.get_technologist(technologist_id).await?;

    Ok(Json(json!(technologist)))
}

#[axum::debug_handler]
pub async fn list_technologists(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TechnologistQuery>,
) -> Result<Json<Value>, AppError> {
    let service = TechnologistService::new(&state);

    let technologists = service.list_technologists(query).await?;

    Ok(Json(json!(technologists)))
}

#[axum::debug_handler]
pub async fn update_technologist(
    State(state): State<Arc<AppState>>,
    Path(technologist_id): Path<i64>,
    Json(request): Json<UpdateTechnologistRequest>,
) -> Result<Json<Value>, AppError> {
    let service = TechnologistService::new(&state);

    let technologist = service.update_technologist(technologist_id, request).await?;

    Ok(Json(json!(technologist)))
}

#[axum::debug_handler]
pub async fn delete_technologist(
    State(state): State<Arc<AppState>>,
    Path(technologist_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = TechnologistService::new(&state);

    service.delete_technologist(technologist_id).await?;

    Ok(Json(json!({ "message": "Technologist deleted successfully" })))
}
