use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use shared_database::AppState;

use appointment_cell::router::appointment_routes;
use audit_cell::router::audit_routes;
use auth_cell::router::auth_routes;
use billing_cell::router::{billing_routes, payment_routes};
use document_cell::router::document_routes;
use equipment_cell::router::{equipment_routes, maintenance_routes, quality_control_routes};
use facility_cell::router::{department_routes, physician_routes, room_routes};
use inventory_cell::router::inventory_routes;
use patient_cell::router::{
    allergy_routes, insurance_routes, medical_history_routes, patient_routes,
};
use schedule_cell::router::schedule_routes;
use staff_cell::router::staff_routes;
use study_cell::router::{annotation_routes, protocol_routes, report_routes, study_routes};

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/auth", auth_routes(state.clone()))
        .nest("/staff", staff_routes(state.clone()))
        .nest("/schedules", schedule_routes(state.clone()))
        .nest("/patients", patient_routes(state.clone()))
        .nest("/medical-history", medical_history_routes(state.clone()))
        .nest("/allergies", allergy_routes(state.clone()))
        .nest("/insurances", insurance_routes(state.clone()))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/studies", study_routes(state.clone()))
        .nest("/reports", report_routes(state.clone()))
        .nest("/annotations", annotation_routes(state.clone()))
        .nest("/protocol-templates", protocol_routes(state.clone()))
        .nest("/departments", department_routes(state.clone()))
        .nest("/rooms", room_routes(state.clone()))
        .nest("/referring-physicians", physician_routes(state.clone()))
        .nest("/equipment", equipment_routes(state.clone()))
        .nest("/maintenance", maintenance_routes(state.clone()))
        .nest("/quality-control", quality_control_routes(state.clone()))
        .nest("/inventory", inventory_routes(state.clone()))
        .nest("/billing", billing_routes(state.clone()))
        .nest("/payments", payment_routes(state.clone()))
        .nest("/documents", document_routes(state.clone()))
        .nest("/audit", audit_routes(state))
}
