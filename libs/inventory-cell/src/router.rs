use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn inventory_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/supplies", post(create_supply))
        .route("/supplies", get(list_supplies))
        .route("/supplies/low-stock", get(get_low_stock_supplies))
        .route("/supplies/expiring-soon", get(get_expiring_supplies))
        .route("/supplies/department/{department_id}", get(get_department_supplies))
        .route("/supplies/{id}", get(get_supply))
        .route("/supplies/{id}", put(update_supply))
        .route("/supplies/{id}", delete(delete_supply))
        .route("/transactions", post(post_transaction))
        .route("/transactions", get(list_transactions))
        .route("/alerts", post(create_alert))
        .route("/alerts", get(list_alerts))
        .route("/alerts/{id}/acknowledge", put(acknowledge_alert))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
