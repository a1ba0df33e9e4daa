use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn equipment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_equipment))
        .route("/", get(list_equipment))
        .route("/maintenance/needed", get(get_equipment_needing_maintenance))
        .route("/serial/{serial}", get(get_equipment_by_serial))
        .route("/room/{room_id}", get(get_equipment_by_room))
        .route("/{id}", get(get_equipment))
        .route("/{id}", put(update_equipment))
        .route("/{id}", delete(delete_equipment))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

pub fn maintenance_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_maintenance_record))
        .route("/", get(list_maintenance_records))
        .route("/upcoming", get(get_upcoming_maintenance))
        .route("/{id}", get(get_maintenance_record))
        .route("/{id}", put(update_maintenance_record))
        .route("/{id}", delete(delete_maintenance_record))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

pub fn quality_control_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_quality_control))
        .route("/", get(list_quality_controls))
        .route("/pending", get(get_pending_quality_controls))
        .route("/needs-review", get(get_needs_review_quality_controls))
        .route("/study/{study_id}", get(get_quality_controls_for_study))
        .route("/equipment/{equipment_id}", get(get_quality_controls_for_equipment))
        .route("/report/{report_id}", get(get_quality_controls_for_report))
        .route("/{id}", get(get_quality_control))
        .route("/{id}", put(update_quality_control))
        .route("/{id}", delete(delete_quality_control))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
