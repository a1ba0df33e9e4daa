use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{
    CreateDepartmentRequest, CreatePhysicianRequest, CreateRoomRequest, PageQuery, PhysicianQuery,
    RoomQuery, UpdateDepartmentRequest, UpdatePhysicianRequest, UpdateRoomRequest,
};
use crate::services::{DepartmentService, PhysicianService, RoomService};

// --- Departments ---

#[axum::debug_handler]
pub async fn create_department(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateDepartmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DepartmentService::new(&state);

    let department = service.create_department(request).await?;

    Ok(Json(json!(department)))
}

#[axum::debug_handler]
pub async fn get_department(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = DepartmentService::new(&state);

    let department = service.get_department(department_id).await?;

    Ok(Json(json!(department)))
}

#[axum::debug_handler]
pub async fn list_departments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, AppError> {
    let service = DepartmentService::new(&state);

    let departments = service.list_departments(query.limit, query.offset).await?;

    Ok(Json(json!(departments)))
}

#[axum::debug_handler]
pub async fn update_department(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<i64>,
    Json(request): Json<UpdateDepartmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DepartmentService::new(&state);

    let department = service.update_department(department_id, request).await?;

    Ok(Json(json!(department)))
}

#[axum::debug_handler]
pub async fn delete_department(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = DepartmentService::new(&state);

    service.delete_department(department_id).await?;

    Ok(Json(json!({ "message": "Department deleted successfully" })))
}

// --- Rooms ---

#[axum::debug_handler]
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<Json<Value>, AppError> {
    let service = RoomService::new(&state);

    let room = service.create_room(request).await?;

    Ok(Json(json!(room)))
}

#[axum::debug_handler]
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = RoomService::new(&state);

    let room = service.get_room(room_id).await?;

    Ok(Json(json!(room)))
}

#[axum::debug_handler]
pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RoomQuery>,
) -> Result<Json<Value>, AppError> {
    let service = RoomService::new(&state);

    let rooms = service.list_rooms(query).await?;

    Ok(Json(json!(rooms)))
}

#[axum::debug_handler]
pub async fn update_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<i64>,
    Json(request): Json<UpdateRoomRequest>,
) -> Result<Json<Value>, AppError> {
    let service = RoomService::new(&state);

    let room = service.update_room(room_id, request).await?;

    Ok(Json(json!(room)))
}

#[axum::debug_handler]
pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = RoomService::new(&state);

    service.delete_room(room_id).await?;

    Ok(Json(json!({ "message": "Room deleted successfully" })))
}

// --- Referring physicians ---

#[axum::debug_handler]
pub async fn create_physician(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePhysicianRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PhysicianService::new(&state);

    let physician = service.create_physician(request).await?;

    Ok(Json(json!(physician)))
}

#[axum::debug_handler]
pub async fn get_physician(
    State(state): State<Arc<AppState>>,
    Path(physician_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = PhysicianService::new(&state);

    let physician = service.get_physician(physician_id).await?;

    Ok(Json(json!(physician)))
}

#[axum::debug_handler]
pub async fn list_physicians(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PhysicianQuery>,
) -> Result<Json<Value>, AppError> {
    let service = PhysicianService::new(&state);

    let physicians = service.list_physicians(query).await?;

    Ok(Json(json!(physicians)))
}

#[axum::debug_handler]
pub async fn update_physician(
    State(state): State<Arc<AppState>>,
    Path(physician_id): Path<i64>,
    Json(request): Json<UpdatePhysicianRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PhysicianService::new(&state);

    let physician = service.update_physician(physician_id, request).await?;

    Ok(Json(json!(physician)))
}

#[axum::debug_handler]
pub async fn delete_physician(
    State(state): State<Arc<AppState>>,
    Path(physician_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = PhysicianService::new(&state);

    service.delete_physician(physician_id).await?;

    Ok(Json(json!({ "message": "Referring physician deleted successfully" })))
}
