use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_url: String,
    pub store_service_key: String,
    pub jwt_secret: String,
    pub access_token_ttl_minutes: i64,
    pub mail_relay_url: String,
    pub mail_relay_api_key: String,
    pub mail_from_address: String,
    pub password_reset_url_base: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            store_url: env::var("STORE_URL")
                .unwrap_or_else(|_| {
                    warn!("STORE_URL not set, using empty value");
                    String::new()
                }),
            store_service_key: env::var("STORE_SERVICE_KEY")
                .unwrap_or_else(|_| {
                    warn!("STORE_SERVICE_KEY not set, using empty value");
                    String::new()
                }),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("JWT_SECRET not set, using empty value");
                    String::new()
                }),
            access_token_ttl_minutes: env::var("ACCESS_TOKEN_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            mail_relay_url: env::var("MAIL_RELAY_URL")
                .unwrap_or_else(|_| {
                    warn!("MAIL_RELAY_URL not set, using empty value");
                    String::new()
                }),
            mail_relay_api_key: env::var("MAIL_RELAY_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("MAIL_RELAY_API_KEY not set, using empty value");
                    String::new()
                }),
            mail_from_address: env::var("MAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| {
                    warn!("MAIL_FROM_ADDRESS not set, using default");
                    "noreply@radiology.local".to_string()
                }),
            password_reset_url_base: env::var("PASSWORD_RESET_URL_BASE")
                .unwrap_or_else(|_| {
                    warn!("PASSWORD_RESET_URL_BASE not set, using default");
                    "http://localhost:3000/reset-password".to_string()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.store_url.is_empty()
            && !self.store_service_key.is_empty()
            && !self.jwt_secret.is_empty()
    }

    pub fn is_mail_configured(&self) -> bool {
        !self.mail_relay_url.is_empty() && !self.mail_relay_api_key.is_empty()
    }
}
