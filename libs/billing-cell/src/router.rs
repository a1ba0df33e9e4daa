use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn billing_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_invoice))
        .route("/", get(list_invoices))
        .route("/patient/{patient_id}", get(get_invoices_for_patient))
        .route("/patient/{patient_id}/unpaid", get(get_unpaid_invoices_for_patient))
        .route("/{id}", get(get_invoice))
        .route("/{id}", put(update_invoice))
        .route("/{id}", delete(delete_invoice))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

pub fn payment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_payment))
        .route("/", get(list_payments))
        .route("/invoice/{invoice_id}", get(get_payments_for_invoice))
        .route("/patient/{patient_id}", get(get_payments_for_patient))
        .route("/{id}", get(get_payment))
        .route("/{id}", put(update_payment))
        .route("/{id}", delete(delete_payment))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
