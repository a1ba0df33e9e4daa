use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{ConflictCheckQuery, DateRangeQuery, ScheduleQuery, ScheduleRequest};
use crate::services::ScheduleService;

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&state);

    let schedule = service.create_schedule(request).await?;

    Ok(Json(json!(schedule)))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Path(schedule_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&state);

    let schedule = service.get_schedule(schedule_id).await?;

    Ok(Json(json!(schedule)))
}

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&state);

    let schedules = service.list_schedules(query).await?;

    Ok(Json(json!(schedules)))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    Path(schedule_id): Path<i64>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&state);

    let schedule = service.update_schedule(schedule_id, request).await?;

    Ok(Json(json!(schedule)))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    Path(schedule_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&state);

    service.delete_schedule(schedule_id).await?;

    Ok(Json(json!({ "message": "Schedule deleted successfully" })))
}

#[axum::debug_handler]
pub async fn get_staff_schedules(
    State(state): State<Arc<AppState>>,
    Path(staff_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&state);

    let schedules = service.get_staff_schedules(staff_id).await?;

    Ok(Json(json!(schedules)))
}

#[axum::debug_handler]
pub async fn get_department_schedules(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&state);

    let schedules = service.get_department_schedules(department_id).await?;

    Ok(Json(json!(schedules)))
}

#[axum::debug_handler]
pub async fn get_schedules_by_date_range(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&state);

    let schedules = service
        .get_schedules_by_date_range(query.start_date, query.end_date)
        .await?;

    Ok(Json(json!(schedules)))
}

#[axum::debug_handler]
pub async fn get_schedules_by_status(
    State(state): State<Arc<AppState>>,
    Path(status): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = ScheduleService::new(&state);

    let schedules = service.get_schedules_by_status(&status).await?;

    Ok(Json(json!(schedules)))
}

#[axum::debug_handler]
pub async fn check_conflict(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConflictCheckQuery>,
) -> Result<Json<Value>, AppError> {
    if query.start_time >= query.end_time {
        return Err(AppError::ValidationError(
            "start_time must be before end_time".to_string(),
        ));
    }

    let service = ScheduleService::new(&state);

    let conflict = service
        .check_conflict(
            query.staff_id,
            query.date,
            query.start_time,
            query.end_time,
            query.exclude_id,
        )
        .await?;

    Ok(Json(json!({ "conflict": conflict })))
}
