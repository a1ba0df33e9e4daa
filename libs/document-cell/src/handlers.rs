use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::auth::AuthUser;
use shared_models::error::AppError;

use crate::models::{
    CreateDocumentRequest, CreateVersionRequest, DocumentQuery, ShareDocumentRequest,
    UpdateDocumentRequest,
};
use crate::services::{DocumentService, ShareService, VersionService};

#[axum::debug_handler]
pub async fn create_document(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateDocumentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DocumentService::new(&state);

    let document = service.create_document(request, user.id).await?;

    Ok(Json(json!(document)))
}

#[axum::debug_handler]
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = DocumentService::new(&state);

    let document = service.get_document(document_id).await?;

    Ok(Json(json!(document)))
}

#[axum::debug_handler]
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DocumentQuery>,
) -> Result<Json<Value>, AppError> {
    let service = DocumentService::new(&state);

    let documents = service.list_documents(query).await?;

    Ok(Json(json!(documents)))
}

#[axum::debug_handler]
pub async fn get_documents_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = DocumentService::new(&state);

    let documents = service.get_documents_by_category(&category).await?;

    Ok(Json(json!(documents)))
}

#[axum::debug_handler]
pub async fn get_documents_for_department(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = DocumentService::new(&state);

    let documents = service.get_documents_for_department(department_id).await?;

    Ok(Json(json!(documents)))
}

#[axum::debug_handler]
pub async fn get_expiring_documents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let service = DocumentService::new(&state);

    let documents = service.get_expiring_documents().await?;

    Ok(Json(json!(documents)))
}

#[axum::debug_handler]
pub async fn update_document(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<i64>,
    Json(request): Json<UpdateDocumentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DocumentService::new(&state);

    let document = service.update_document(document_id, request).await?;

    Ok(Json(json!(document)))
}

#[axum::debug_handler]
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = DocumentService::new(&state);

    service.delete_document(document_id).await?;

    Ok(Json(json!({ "message": "Document deleted successfully" })))
}

// --- Versions ---

#[axum::debug_handler]
pub async fn create_document_version(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(document_id): Path<i64>,
    Json(request): Json<CreateVersionRequest>,
) -> Result<Json<Value>, AppError> {
    let service = VersionService::new(&state);

    let version = service.create_version(document_id, request, user.id).await?;

    Ok(Json(json!(version)))
}

#[axum::debug_handler]
pub async fn list_document_versions(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = VersionService::new(&state);

    let versions = service.list_versions(document_id).await?;

    Ok(Json(json!(versions)))
}

// --- Shares ---

#[axum::debug_handler]
pub async fn share_document(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(document_id): Path<i64>,
    Json(request): Json<ShareDocumentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ShareService::new(&state);

    let share = service.share_document(document_id, request, user.id).await?;

    Ok(Json(json!(share)))
}

#[axum::debug_handler]
pub async fn get_shared_with_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let service = ShareService::new(&state);

    let documents = service.get_shared_with_user(&state, user.id).await?;

    Ok(Json(json!(documents)))
}

#[axum::debug_handler]
pub async fn get_shared_by_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let service = ShareService::new(&state);

    let documents = service.get_shared_by_user(&state, user.id).await?;

    Ok(Json(json!(documents)))
}
