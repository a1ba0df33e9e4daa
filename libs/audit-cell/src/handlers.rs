use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::auth::AuthUser;
use shared_models::error::AppError;

use crate::models::{AuditQuery, CreateAuditEntryRequest};
use crate::services::AuditService;

#[axum::debug_handler]
pub async fn append_audit_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateAuditEntryRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AuditService::new(&state);

    let entry = service.append_entry(request, user.id).await?;

    Ok(Json(json!(entry)))
}

#[axum::debug_handler]
pub async fn get_audit_entry(
    State(state): State<Arc<AppState>>,
    Path(entry_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = AuditService::new(&state);

    let entry = service.get_entry(entry_id).await?;

    Ok(Json(json!(entry)))
}

#[axum::debug_handler]
pub async fn list_audit_entries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Value>, AppError> {
    let service = AuditService::new(&state);

    let entries = service.list_entries(query).await?;

    Ok(Json(json!(entries)))
}
