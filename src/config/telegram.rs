//! Telegram configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Telegram configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token issued by BotFather
    pub bot_token: String,

    /// Shared secret echoed by Telegram on every webhook delivery
    pub webhook_secret: String,

    /// Public HTTPS URL of the webhook endpoint (needed only to
    /// register the webhook, not to serve it)
    pub public_url: Option<String>,

    /// Chat that receives handoff notes; no chat means handoffs are
    /// logged but not forwarded
    pub sales_manager_chat_id: Option<i64>,

    /// Bot API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bot API request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl TelegramConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate Telegram configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bot_token.is_empty() {
            return Err(ValidationError::MissingRequired("TELEGRAM_BOT_TOKEN"));
        }
        if self.webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("WEBHOOK_SECRET"));
        }
        if let Some(url) = &self.public_url {
            if !url.starts_with("https://") || !url.ends_with("/webhook") {
                return Err(ValidationError::InvalidPublicUrl);
            }
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            webhook_secret: String::new(),
            public_url: None,
            sales_manager_chat_id: None,
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_timeout() -> u64 {
    10
}
