use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn schedule_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_schedule))
        .route("/", get(list_schedules))
        .route("/conflict-check", get(check_conflict))
        .route("/date-range", get(get_schedules_by_date_range))
        .route("/staff/{staff_id}", get(get_staff_schedules))
        .route("/department/{department_id}", get(get_department_schedules))
        .route("/status/{status}", get(get_schedules_by_status))
        .route("/{id}", get(get_schedule))
        .route("/{id}", put(update_schedule))
        .route("/{id}", delete(delete_schedule))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
