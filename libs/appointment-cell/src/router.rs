use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn appointment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_appointment))
        .route("/", get(list_appointments))
        .route("/patient/{patient_id}", get(get_appointments_for_patient))
        .route("/{id}", get(get_appointment))
        .route("/{id}", put(update_appointment))
        .route("/{id}", delete(delete_appointment))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
