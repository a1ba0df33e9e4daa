use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn auth_routes(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/me", get(me))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/login", post(login))
        .route("/verify", post(verify_token))
        .route("/forgot-password", post(forgot_password))
        .merge(protected)
        .with_state(state)
}
