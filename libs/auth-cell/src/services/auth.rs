use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::jwt::{issue_reset_token, issue_token};

use crate::models::{AuthError, LoginResponse, StaffAccount};
use crate::services::mail::MailClient;
use crate::services::password::verify_password;

pub struct AuthService {
    store: PostgrestClient,
    config: AppConfig,
}

impl AuthService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            config: state.config.clone(),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StaffAccount>, AuthError> {
        let path = TableQuery::new("staff_users").eq("email", email).limit(1).path();
        let mut rows: Vec<StaffAccount> = self.store.request(Method::GET, &path, None).await?;

        Ok(if rows.is_empty() { None } else { Some(rows.remove(0)) })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        debug!("Login attempt for {}", email);

        // Same error for unknown email and bad password, so responses do
        // not reveal which accounts exist.
        let mut account = self
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let verified = verify_password(password, &account.password_hash)
            .map_err(|e| AuthError::Database(e.to_string()))?;
        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        let path = TableQuery::new("staff_users").eq("id", account.id).path();
        let _: Vec<Value> = self
            .store
            .mutate(
                Method::PATCH,
                &path,
                Some(json!({ "last_login": now.to_rfc3339() })),
            )
            .await?;
        account.last_login = Some(now);

        let access_token = issue_token(
            account.id,
            &account.email,
            &account.role,
            &self.config.jwt_secret,
            self.config.access_token_ttl_minutes,
        )
        .map_err(AuthError::Token)?;

        debug!("Login succeeded for staff user {}", account.id);

        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            user: account,
        })
    }

    pub async fn get_account(&self, user_id: i64) -> Result<StaffAccount, AuthError> {
        let path = TableQuery::new("staff_users").eq("id", user_id).path();
        let mut rows: Vec<StaffAccount> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(AuthError::NotFound);
        }
        Ok(rows.remove(0))
    }

    /// Kicks off the password-reset flow. Returns Ok whether or not the
    /// account exists; the mail send is fire-and-forget.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let Some(account) = self.find_by_email(email).await? else {
            debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let reset_token = issue_reset_token(
            account.id,
            &account.email,
            &account.role,
            &self.config.jwt_secret,
        )
        .map_err(AuthError::Token)?;

        let reset_link = format!(
            "{}?token={}",
            self.config.password_reset_url_base, reset_token
        );

        let mail = MailClient::new(&self.config);
        let to = account.email.clone();
        tokio::spawn(async move {
            if let Err(e) = mail.send_password_reset(&to, &reset_link).await {
                warn!("Failed to send password reset mail: {}", e);
            }
        });

        Ok(())
    }
}
