use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: i64,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    /// Present only on special-purpose tokens ("password_reset").
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_use: Option<String>,
}

/// Authenticated caller, injected into request extensions by the auth middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenVerification {
    pub valid: bool,
    pub user_id: i64,
    pub email: String,
    pub role: String,
    pub expires_at: Option<DateTime<Utc>>,
}
