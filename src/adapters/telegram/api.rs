//! Telegram Bot API client.
//!
//! Implements the OutboundMessenger port over `sendMessage` and adds
//! `setWebhook` for the registration binary. One POST per call, bot
//! token embedded in the method URL as the Bot API requires.
//!
//! # Configuration
//!
//! ```ignore
//! let config = TelegramApiConfig::new(bot_token);
//! let api = TelegramApi::new(config);
//! api.send_text(chat, "Здравствуйте!").await?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::foundation::ChatId;
use crate::ports::{OutboundMessenger, SendError};

/// Update kinds the webhook subscribes to.
pub const ALLOWED_UPDATES: [&str; 2] = ["message", "callback_query"];

/// Configuration for the Bot API client.
#[derive(Debug, Clone)]
pub struct TelegramApiConfig {
    /// Bot token issued by BotFather.
    token: Secret<String>,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl TelegramApiConfig {
    /// Creates a configuration with the given bot token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Secret::new(token.into()),
            base_url: "https://api.telegram.org".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

/// Telegram Bot API client.
pub struct TelegramApi {
    config: TelegramApiConfig,
    client: Client,
}

impl TelegramApi {
    /// Creates a client with the given configuration.
    pub fn new(config: TelegramApiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Registers the webhook endpoint with the platform.
    ///
    /// Returns the platform's description line on success.
    ///
    /// # Errors
    ///
    /// Same contract as `send_text`: network failures and platform
    /// refusals.
    pub async fn set_webhook(&self, url: &str, secret_token: &str) -> Result<String, SendError> {
        let body = SetWebhookBody {
            url: url.to_string(),
            secret_token: secret_token.to_string(),
            allowed_updates: ALLOWED_UPDATES,
        };

        let response = self.call("setWebhook", &body).await?;
        Ok(response.description.unwrap_or_else(|| "ok".to_string()))
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.config.base_url, self.config.token(), method)
    }

    async fn call<B: Serialize>(&self, method: &str, body: &B) -> Result<ApiResponse, SendError> {
        let response = self
            .client
            .post(self.method_url(method))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SendError::network(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    SendError::network(format!("Connection failed: {e}"))
                } else {
                    SendError::network(e.to_string())
                }
            })?;

        let status = response.status();
        match response.json::<ApiResponse>().await {
            Ok(api) if api.ok => Ok(api),
            Ok(api) => Err(SendError::rejected(
                status.as_u16(),
                api.description
                    .unwrap_or_else(|| "no description".to_string()),
            )),
            Err(e) if status.is_success() => {
                Err(SendError::network(format!("Failed to parse response: {e}")))
            }
            Err(_) => Err(SendError::rejected(status.as_u16(), "undecodable error body")),
        }
    }
}

#[async_trait]
impl OutboundMessenger for TelegramApi {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), SendError> {
        let body = SendMessageBody {
            chat_id: chat.as_i64(),
            text: text.to_string(),
        };

        self.call("sendMessage", &body).await?;
        Ok(())
    }
}

// ----- Bot API Types -----

#[derive(Debug, Serialize)]
struct SendMessageBody {
    chat_id: i64,
    text: String,
}

#[derive(Debug, Serialize)]
struct SetWebhookBody {
    url: String,
    secret_token: String,
    allowed_updates: [&'static str; 2],
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}
