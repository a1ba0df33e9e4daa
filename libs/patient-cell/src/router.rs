use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn patient_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_patient))
        .route("/", get(search_patients))
        .route("/mrn/{mrn}", get(get_patient_by_mrn))
        .route("/{id}", get(get_patient))
        .route("/{id}", put(update_patient))
        .route("/{id}", delete(delete_patient))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

pub fn medical_history_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_medical_history))
        .route("/", get(list_medical_history))
        .route("/patient/{patient_id}", get(get_medical_history_for_patient))
        .route("/{id}", get(get_medical_history))
        .route("/{id}", put(update_medical_history))
        .route("/{id}", delete(delete_medical_history))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

pub fn allergy_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_allergy))
        .route("/", get(list_allergies))
        .route("/patient/{patient_id}", get(get_allergies_for_patient))
        .route(
            "/patient/{patient_id}/active",
            get(get_active_allergies_for_patient),
        )
        .route("/{id}", get(get_allergy))
        .route("/{id}", put(update_allergy))
        .route("/{id}", delete(delete_allergy))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

pub fn insurance_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_insurance_policy))
        .route("/", get(list_insurance_policies))
        .route(
            "/patient/{patient_id}",
            get(get_insurance_policies_for_patient),
        )
        .route("/{id}", get(get_insurance_policy))
        .route("/{id}", put(update_insurance_policy))
        .route("/{id}", delete(delete_insurance_policy))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
