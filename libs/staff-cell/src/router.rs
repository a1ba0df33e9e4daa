use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn staff_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users", post(create_staff_user))
        .route("/users", get(list_staff_users))
        .route("/users/role/{role}", get(get_staff_by_role))
        .route("/users/{id}", get(get_staff_user))
        .route("/users/{id}", put(update_staff_user))
        .route("/users/{id}", delete(delete_staff_user))
        .route("/technologists", post(create_technologist))
        .route("/technologists", get(list_technologists))
        .route("/technologists/{id}", get(get_technologist))
        .route("/technologists/{id}", put(update_technologist))
        .route("/technologists/{id}", delete(delete_technologist))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
