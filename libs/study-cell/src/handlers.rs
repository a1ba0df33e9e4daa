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
    AnnotationQuery, CreateAnnotationRequest, CreateProtocolRequest, CreateReportRequest,
    CreateStudyRequest, ProtocolQuery, ReportQuery, ReviewAnnotationRequest, StudyQuery,
    UpdateAnnotationRequest, UpdateProtocolRequest, UpdateReportRequest, UpdateStudyRequest,
};
use crate::services::{AnnotationService, ProtocolService, ReportService, StudyService};

// --- Studies ---

#[axum::debug_handler]
pub async fn create_study(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateStudyRequest>,
) -> Result<Json<Value>, AppError> {
    let service = StudyService::new(&state);

    let study = service.create_study(request).await?;

    Ok(Json(json!(study)))
}

#[axum::debug_handler]
pub async fn get_study(
    State(state): State<Arc<AppState>>,
    Path(study_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = StudyService::new(&state);

    let study = service.get_study(study_id).await?;

    Ok(Json(json!(study)))
}

#[axum::debug_handler]
pub async fn list_studies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StudyQuery>,
) -> Result<Json<Value>, AppError> {
    let service = StudyService::new(&state);

    let studies = service.list_studies(query).await?;

    Ok(Json(json!(studies)))
}

#[axum::debug_handler]
pub async fn get_studies_for_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = StudyService::new(&state);

    let studies = service.get_studies_for_patient(patient_id).await?;

    Ok(Json(json!(studies)))
}

#[axum::debug_handler]
pub async fn update_study(
    State(state): State<Arc<AppState>>,
    Path(study_id): Path<i64>,
    Json(request): Json<UpdateStudyRequest>,
) -> Result<Json<Value>, AppError> {
    let service = StudyService::new(&state);

    let study = service.update_study(study_id, request).await?;

    Ok(Json(json!(study)))
}

#[axum::debug_handler]
pub async fn delete_study(
    State(state): State<Arc<AppState>>,
    Path(study_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = StudyService::new(&state);

    service.delete_study(study_id).await?;

    Ok(Json(json!({ "message": "Study deleted successfully" })))
}

// --- Radiology reports ---

#[axum::debug_handler]
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateReportRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ReportService::new(&state);

    let report = service.create_report(request).await?;

    Ok(Json(json!(report)))
}

#[axum::debug_handler]
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(report_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ReportService::new(&state);

    let report = service.get_report(report_id).await?;

    Ok(Json(json!(report)))
}

#[axum::debug_handler]
pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Value>, AppError> {
    let service = ReportService::new(&state);

    let reports = service.list_reports(query).await?;

    Ok(Json(json!(reports)))
}

#[axum::debug_handler]
pub async fn get_report_for_study(
    State(state): State<Arc<AppState>>,
    Path(study_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ReportService::new(&state);

    let report = service.get_report_for_study(study_id).await?;

    Ok(Json(json!(report)))
}

#[axum::debug_handler]
pub async fn get_reports_for_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ReportService::new(&state);

    let reports = service.get_reports_for_patient(patient_id).await?;

    Ok(Json(json!(reports)))
}

#[axum::debug_handler]
pub async fn get_reports_for_radiologist(
    State(state): State<Arc<AppState>>,
    Path(radiologist_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ReportService::new(&state);

    let reports = service.get_reports_for_radiologist(radiologist_id).await?;

    Ok(Json(json!(reports)))
}

#[axum::debug_handler]
pub async fn get_reports_by_status(
    State(state): State<Arc<AppState>>,
    Path(status): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = ReportService::new(&state);

    let reports = service.get_reports_by_status(&status).await?;

    Ok(Json(json!(reports)))
}

#[axum::debug_handler]
pub async fn get_critical_findings_reports(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let service = ReportService::new(&state);

    let reports = service.get_critical_findings_reports().await?;

    Ok(Json(json!(reports)))
}

#[axum::debug_handler]
pub async fn sign_report(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(report_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ReportService::new(&state);

    let report = service.sign_report(report_id, user.id).await?;

    Ok(Json(json!(report)))
}

#[axum::debug_handler]
pub async fn update_report(
    State(state): State<Arc<AppState>>,
    Path(report_id): Path<i64>,
    Json(request): Json<UpdateReportRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ReportService::new(&state);

    let report = service.update_report(report_id, request).await?;

    Ok(Json(json!(report)))
}

#[axum::debug_handler]
pub async fn delete_report(
    State(state): State<Arc<AppState>>,
    Path(report_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ReportService::new(&state);

    service.delete_report(report_id).await?;

    Ok(Json(json!({ "message": "Report deleted successfully" })))
}

// --- Image annotations ---

#[axum::debug_handler]
pub async fn create_annotation(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAnnotationRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AnnotationService::new(&state);

    let annotation = service.create_annotation(request).await?;

    Ok(Json(json!(annotation)))
}

#[axum::debug_handler]
pub async fn get_annotation(
    State(state): State<Arc<AppState>>,
    Path(annotation_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = AnnotationService::new(&state);

    let annotation = service.get_annotation(annotation_id).await?;

    Ok(Json(json!(annotation)))
}

#[axum::debug_handler]
pub async fn list_annotations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnnotationQuery>,
) -> Result<Json<Value>, AppError> {
    let service = AnnotationService::new(&state);

    let annotations = service.list_annotations(query).await?;

    Ok(Json(json!(annotations)))
}

#[axum::debug_handler]
pub async fn get_annotations_for_study(
    State(state): State<Arc<AppState>>,
    Path(study_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = AnnotationService::new(&state);

    let annotations = service.get_annotations_for_study(study_id).await?;

    Ok(Json(json!(annotations)))
}

#[axum::debug_handler]
pub async fn get_annotations_by_annotator(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = AnnotationService::new(&state);

    let annotations = service.get_annotations_by_annotator(user_id).await?;

    Ok(Json(json!(annotations)))
}

#[axum::debug_handler]
pub async fn get_ai_generated_annotations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let service = AnnotationService::new(&state);

    let annotations = service.get_ai_generated_annotations().await?;

    Ok(Json(json!(annotations)))
}

#[axum::debug_handler]
pub async fn update_annotation(
    State(state): State<Arc<AppState>>,
    Path(annotation_id): Path<i64>,
    Json(request): Json<UpdateAnnotationRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AnnotationService::new(&state);

    let annotation = service.update_annotation(annotation_id, request).await?;

    Ok(Json(json!(annotation)))
}

#[axum::debug_handler]
pub async fn review_annotation(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(annotation_id): Path<i64>,
    Json(request): Json<ReviewAnnotationRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AnnotationService::new(&state);

    let annotation = service.review_annotation(annotation_id, user.id, request).await?;

    Ok(Json(json!(annotation)))
}

#[axum::debug_handler]
pub async fn delete_annotation(
    State(state): State<Arc<AppState>>,
    Path(annotation_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = AnnotationService::new(&state);

    service.delete_annotation(annotation_id).await?;

    Ok(Json(json!({ "message": "Annotation deleted successfully" })))
}

// --- Protocol templates ---

#[axum::debug_handler]
pub async fn create_protocol(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateProtocolRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ProtocolService::new(&state);

    let protocol = service.create_protocol(request).await?;

    Ok(Json(json!(protocol)))
}

#[axum::debug_handler]
pub async fn get_protocol(
    State(state): State<Arc<AppState>>,
    Path(protocol_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ProtocolService::new(&state);

    let protocol = service.get_protocol(protocol_id).await?;

    Ok(Json(json!(protocol)))
}

#[axum::debug_handler]
pub async fn list_protocols(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProtocolQuery>,
) -> Result<Json<Value>, AppError> {
    let service = ProtocolService::new(&state);

    let protocols = service.list_protocols(query).await?;

    Ok(Json(json!(protocols)))
}

#[axum::debug_handler]
pub async fn get_active_protocols(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let service = ProtocolService::new(&state);

    let protocols = service.get_active_protocols().await?;

    Ok(Json(json!(protocols)))
}

#[axum::debug_handler]
pub async fn update_protocol(
    State(state): State<Arc<AppState>>,
    Path(protocol_id): Path<i64>,
    Json(request): Json<UpdateProtocolRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ProtocolService::new(&state);

    let protocol = service.update_protocol(protocol_id, request).await?;

    Ok(Json(json!(protocol)))
}

#[axum::debug_handler]
pub async fn duplicate_protocol(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(protocol_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ProtocolService::new(&state);

    let protocol = service.duplicate_protocol(protocol_id, user.id).await?;

    Ok(Json(json!(protocol)))
}

#[axum::debug_handler]
pub async fn delete_protocol(
    State(state): State<Arc<AppState>>,
    Path(protocol_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ProtocolService::new(&state);

    service.delete_protocol(protocol_id).await?;

    Ok(Json(json!({ "message": "Protocol template deleted successfully" })))
}
