use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    http::HeaderMap,
    Json,
};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tracing::debug;

use shared_database::AppState;
use shared_models::auth::{AuthUser, TokenVerification};
use shared_models::error::AppError;
use shared_utils::jwt::validate_claims;

use crate::models::{ForgotPasswordRequest, LoginRequest, LoginResponse};
use crate::services::AuthService;

fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let auth_header = headers
        .get("Authorization")
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Auth("Invalid authorization header format".to_string()))?;

    if !auth_value.starts_with("Bearer ") {
        return Err(AppError::Auth("Invalid authorization header format".to_string()));
    }

    Ok(auth_value[7..].to_string())
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let service = AuthService::new(&state);

    let response = service.login(&request.email, &request.password).await?;

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn verify_token(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TokenVerification>, AppError> {
    debug!("Verifying token");

    let token = extract_bearer_token(&headers)?;

    let claims = validate_claims(&token, &state.config.jwt_secret).map_err(AppError::Auth)?;

    Ok(Json(TokenVerification {
        valid: true,
        user_id: claims.sub,
        email: claims.email,
        role: claims.role,
        expires_at: Utc.timestamp_opt(claims.exp, 0).single(),
    }))
}

#[axum::debug_handler]
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let service = AuthService::new(&state);

    let account = service.get_account(user.id).await?;

    Ok(Json(json!(account)))
}

#[axum::debug_handler]
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AuthService::new(&state);

    service.forgot_password(&request.email).await?;

    // Neutral response regardless of whether the account exists.
    Ok(Json(json!({
        "message": "If your email is registered, you will receive password reset instructions"
    })))
}
