use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{AppointmentQuery, CreateAppointmentRequest, UpdateAppointmentRequest};
use crate::services::AppointmentService;

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    let appointment = service.create_appointment(request).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    let appointment = service.get_appointment(appointment_id).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AppointmentQuery>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    let appointments = service.list_appointments(query).await?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn get_appointments_for_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    let appointments = service.get_appointments_for_patient(patient_id).await?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<i64>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    let appointment = service.update_appointment(appointment_id, request).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    service.delete_appointment(appointment_id).await?;

    Ok(Json(json!({ "message": "Appointment deleted successfully" })))
}
