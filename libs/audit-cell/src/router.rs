use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

/// Entries are append-only, so there are no update or delete routes.
pub fn audit_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(append_audit_entry))
        .route("/", get(list_audit_entries))
        .route("/{id}", get(get_audit_entry))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
