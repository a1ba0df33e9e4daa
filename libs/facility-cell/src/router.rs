use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn department_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_department))
        .route("/", get(list_departments))
        .route("/{id}", get(get_department))
        .route("/{id}", put(update_department))
        .route("/{id}", delete(delete_department))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

pub fn room_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_room))
        .route("/", get(list_rooms))
        .route("/{id}", get(get_room))
        .route("/{id}", put(update_room))
        .route("/{id}", delete(delete_room))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

pub fn physician_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_physician))
        .route("/", get(list_physicians))
        .route("/{id}", get(get_physician))
        .route("/{id}", put(update_physician))
        .route("/{id}", delete(delete_physician))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
