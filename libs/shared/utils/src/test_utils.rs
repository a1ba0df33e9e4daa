use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use shared_config::AppConfig;
use shared_database::AppState;
use shared_models::auth::AuthUser;

pub struct TestConfig {
    pub jwt_secret: String,
    pub store_url: String,
    pub store_service_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            store_url: "http://localhost:54321".to_string(),
            store_service_key: "test-service-key".to_string(),
        }
    }
}

impl TestConfig {
    /// Points the store client at a wiremock server.
    pub fn with_store_url(store_url: &str) -> Self {
        Self {
            store_url: store_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            store_url: self.store_url.clone(),
            store_service_key: self.store_service_key.clone(),
            jwt_secret: self.jwt_secret.clone(),
            access_token_ttl_minutes: 30,
            mail_relay_url: String::new(),
            mail_relay_api_key: String::new(),
            mail_from_address: "noreply@radiology.test".to_string(),
            password_reset_url_base: "http://localhost:3000/reset-password".to_string(),
        }
    }

    pub fn to_state(&self) -> Arc<AppState> {
        Arc::new(AppState::new(self.to_app_config()))
    }
}

pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: 1,
            email: "test@example.com".to_string(),
            role: "receptionist".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(id: i64, email: &str, role: &str) -> Self {
        Self {
            id,
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn admin(id: i64) -> Self {
        Self::new(id, "admin@example.com", "admin")
    }

    pub fn radiologist(id: i64) -> Self {
        Self::new(id, "radiologist@example.com", "radiologist")
    }

    pub fn technologist(id: i64) -> Self {
        Self::new(id, "technologist@example.com", "technologist")
    }

    pub fn to_auth_user(&self) -> AuthUser {
        AuthUser {
            id: self.id,
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "email": user.email,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::validate_token;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::default();
        let app_config = config.to_app_config();

        assert_eq!(app_config.store_url, "http://localhost:54321");
        assert_eq!(app_config.store_service_key, "test-service-key");
        assert!(!app_config.jwt_secret.is_empty());
    }

    #[test]
    fn test_token_validates_against_real_validator() {
        let config = TestConfig::default();
        let user = TestUser::radiologist(9);
        let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, Some(1));

        let auth_user = validate_token(&token, &config.jwt_secret).unwrap();
        assert_eq!(auth_user.id, 9);
        assert_eq!(auth_user.role, "radiologist");
    }

    #[test]
    fn expired_test_token_is_rejected() {
        let config = TestConfig::default();
        let user = TestUser::default();
        let token = JwtTestUtils::create_expired_token(&user, &config.jwt_secret);

        assert!(validate_token(&token, &config.jwt_secret).is_err());
    }
}
