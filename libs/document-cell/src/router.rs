use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn document_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_document))
        .route("/", get(list_documents))
        .route("/shared-with-me", get(get_shared_with_me))
        .route("/shared-by-me", get(get_shared_by_me))
        .route("/expiring-soon", get(get_expiring_documents))
        .route("/category/{category}", get(get_documents_by_category))
        .route("/department/{department_id}", get(get_documents_for_department))
        .route("/{id}/versions", post(create_document_version))
        .route("/{id}/versions", get(list_document_versions))
        .route("/{id}/share", post(share_document))
        .route("/{id}", get(get_document))
        .route("/{id}", put(update_document))
        .route("/{id}", delete(delete_document))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
