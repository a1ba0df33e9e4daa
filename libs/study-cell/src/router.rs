use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn study_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_study))
        .route("/", get(list_studies))
        .route("/patient/{patient_id}", get(get_studies_for_patient))
        .route("/{id}", get(get_study))
        .route("/{id}", put(update_study))
        .route("/{id}", delete(delete_study))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

pub fn report_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_report))
        .route("/", get(list_reports))
        .route("/critical-findings", get(get_critical_findings_reports))
        .route("/study/{study_id}", get(get_report_for_study))
        .route("/patient/{patient_id}", get(get_reports_for_patient))
        .route("/radiologist/{radiologist_id}", get(get_reports_for_radiologist))
        .route("/status/{status}", get(get_reports_by_status))
        .route("/{id}/sign", post(sign_report))
        .route("/{id}", get(get_report))
        .route("/{id}", put(update_report))
        .route("/{id}", delete(delete_report))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

pub fn annotation_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_annotation))
        .route("/", get(list_annotations))
        .route("/ai-generated", get(get_ai_generated_annotations))
        .route("/study/{study_id}", get(get_annotations_for_study))
        .route("/user/{user_id}", get(get_annotations_by_annotator))
        .route("/{id}/review", post(review_annotation))
        .route("/{id}", get(get_annotation))
        .route("/{id}", put(update_annotation))
        .route("/{id}", delete(delete_annotation))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

pub fn protocol_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_protocol))
        .route("/", get(list_protocols))
        .route("/active", get(get_active_protocols))
        .route("/{id}/duplicate", post(duplicate_protocol))
        .route("/{id}", get(get_protocol))
        .route("/{id}", put(update_protocol))
        .route("/{id}", delete(delete_protocol))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
