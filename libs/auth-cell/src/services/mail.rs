use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;

/// Thin client for the HTTP mail relay used for password-reset mail.
#[derive(Clone)]
pub struct MailClient {
    client: Client,
    relay_url: String,
    api_key: String,
    from_address: String,
}

impl MailClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            relay_url: config.mail_relay_url.clone(),
            api_key: config.mail_relay_api_key.clone(),
            from_address: config.mail_from_address.clone(),
        }
    }

    pub async fn send_password_reset(&self, to: &str, reset_link: &str) -> Result<()> {
        if self.relay_url.is_empty() {
            return Err(anyhow!("Mail relay is not configured"));
        }

        let body = json!({
            "from": self.from_address,
            "to": to,
            "subject": "Password Reset Request",
            "text": format!(
                "Hello,\n\n\
                 You have requested to reset your password. Please use the link below:\n\n\
                 {}\n\n\
                 If you did not request this, please ignore this email.",
                reset_link
            )
        });

        debug!("Sending password reset mail to {}", to);

        let response = self
            .client
            .post(&self.relay_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Mail relay error ({}): {}", status, error_text));
        }

        Ok(())
    }
}
