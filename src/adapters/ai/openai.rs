//! OpenAI-backed implementation of the reply generator port.
//!
//! One-shot chat completions only: the bot sends two prompt halves and
//! wants the raw completion text back. No streaming, no retries; a
//! failed call surfaces immediately so the caller can serve its
//! degraded reply inside the webhook window.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let generator = OpenAiGenerator::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{GenerateError, GenerateRequest, ReplyGenerator};

/// Configuration for the OpenAI generator.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Creates a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
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

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI chat completions client.
pub struct OpenAiGenerator {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiGenerator {
    /// Creates a generator with the given configuration.
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn to_chat_request(&self, request: &GenerateRequest) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_prompt.clone(),
                },
            ],
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, request: &GenerateRequest) -> Result<Response, GenerateError> {
        let chat_request = self.to_chat_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerateError::timeout(self.config.timeout.as_secs() as u32)
                } else if e.is_connect() {
                    GenerateError::network(format!("Connection failed: {e}"))
                } else {
                    GenerateError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(
        &self,
        response: Response,
    ) -> Result<Response, GenerateError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(GenerateError::AuthenticationFailed),
            429 => Err(GenerateError::rate_limited(parse_retry_after(&error_body))),
            500..=599 => Err(GenerateError::unavailable(format!(
                "Server error {status}: {error_body}"
            ))),
            _ => Err(GenerateError::network(format!(
                "Unexpected status {status}: {error_body}"
            ))),
        }
    }
}

#[async_trait]
impl ReplyGenerator for OpenAiGenerator {
    async fn generate(&self, request: GenerateRequest) -> Result<String, GenerateError> {
        let response = self.send_request(&request).await?;
        let response = self.handle_response_status(response).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::parse(format!("Failed to parse response: {e}")))?;

        // A decodable body with no content is a model answer, just an
        // empty one; the frame parser downstream decides what to do.
        Ok(first_choice_content(body))
    }
}

/// Extracts the first choice's content, empty when absent.
fn first_choice_content(response: ChatResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default()
}

/// Pulls a retry delay out of a 429 body, defaulting to 30 seconds.
fn parse_retry_after(error_body: &str) -> u32 {
    serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .as_ref()
        .and_then(|parsed| parsed.get("error"))
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .and_then(|message| {
            // OpenAI phrases throttling as "try again in Xs".
            let rest = &message[message.find("try again in ")? + "try again in ".len()..];
            let digits = rest.split(|c: char| !c.is_ascii_digit()).next()?;
            digits.parse::<u32>().ok()
        })
        .unwrap_or(30)
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = OpenAiConfig::new("test-key")
            .with_model("gpt-4o")
            .with_base_url("https://custom.api.com/v1")
            .with_timeout(Duration::from_secs(10));

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://custom.api.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn config_defaults_match_the_production_model() {
        let config = OpenAiConfig::new("key");

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn chat_request_carries_both_prompt_halves() {
        let generator = OpenAiGenerator::new(OpenAiConfig::new("key"));
        let request = GenerateRequest::new("системная часть", "пользовательская часть")
            .with_max_output_tokens(200)
            .with_temperature(0.4);

        let chat = generator.to_chat_request(&request);

        assert_eq!(chat.model, "gpt-4o-mini");
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].role, "system");
        assert_eq!(chat.messages[0].content, "системная часть");
        assert_eq!(chat.messages[1].role, "user");
        assert_eq!(chat.messages[1].content, "пользовательская часть");
        assert_eq!(chat.max_tokens, 200);
        assert_eq!(chat.temperature, 0.4);
    }

    #[test]
    fn response_content_is_extracted() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Здравствуйте"}}]}"#,
        )
        .unwrap();

        assert_eq!(first_choice_content(body), "Здравствуйте");
    }

    #[test]
    fn missing_content_extracts_to_empty() {
        let body: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();

        assert_eq!(first_choice_content(body), "");
    }

    #[test]
    fn empty_choices_extracts_to_empty() {
        let body: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();

        assert_eq!(first_choice_content(body), "");
    }

    #[test]
    fn parse_retry_after_from_message() {
        let error = r#"{"error":{"message":"Rate limit exceeded. Please try again in 30 seconds."}}"#;
        assert_eq!(parse_retry_after(error), 30);
    }

    #[test]
    fn parse_retry_after_short_form() {
        let error = r#"{"error":{"message":"Please try again in 6s."}}"#;
        assert_eq!(parse_retry_after(error), 6);
    }

    #[test]
    fn parse_retry_after_default() {
        let error = r#"{"error":{"message":"Something went wrong"}}"#;
        assert_eq!(parse_retry_after(error), 30);
    }
}
