//! Reply Generator Port - Interface for the generation provider.
//!
//! Abstracts the language-model call behind a single contract: two
//! prompt halves in, raw text out. The engine never sees provider
//! wire formats; it hands the raw text to the frame parser and treats
//! any error here as "provider unreachable".
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct CannedGenerator;
//!
//! #[async_trait]
//! impl ReplyGenerator for CannedGenerator {
//!     async fn generate(&self, _request: GenerateRequest) -> Result<String, GenerateError> {
//!         Ok(r#"{"reply": "Здравствуйте", "intent": "smalltalk", "state": "idle"}"#.to_string())
//!     }
//! }
//! ```

use async_trait::async_trait;

/// Output budget used when the caller sets none.
///
/// Short replies keep latency and cost down; a frame that hits this
/// bound truncates mid-JSON and folds into the parse fallback.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 200;

/// Sampling temperature used when the caller sets none.
///
/// Low on purpose: the model must follow the frame schema, not be
/// creative about it.
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Port for the generation provider.
///
/// Implementations connect to an external model API and must bound the
/// call with a timeout; a call that neither returns nor fails would
/// hang the reply past every guarantee the engine makes.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Generates raw reply text for one composed request.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::Timeout`] when the bounded call ran out of time
    /// - [`GenerateError::Network`] on connect/transport failures
    /// - [`GenerateError::RateLimited`] on provider throttling
    /// - [`GenerateError::AuthenticationFailed`] on credential rejection
    /// - [`GenerateError::Unavailable`] on other non-success statuses
    /// - [`GenerateError::Parse`] when the provider body is undecodable
    async fn generate(&self, request: GenerateRequest) -> Result<String, GenerateError>;
}

/// One generation call: prompts plus sampling bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Instructions and knowledge digest.
    pub system_prompt: String,
    /// Dialogue history and current message.
    pub user_prompt: String,
    /// Output budget in tokens.
    pub max_output_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl GenerateRequest {
    /// Creates a request with the default output bounds.
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Sets the output token budget.
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Generation provider errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Request timed out.
    #[error("generation timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// API key was rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider returned a non-success status.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Provider body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

impl GenerateError {
    /// Creates a timeout error.
    pub fn timeout(timeout_secs: u32) -> Self {
        Self::Timeout { timeout_secs }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if a later retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerateError::Timeout { .. }
                | GenerateError::Network(_)
                | GenerateError::RateLimited { .. }
                | GenerateError::Unavailable { .. }
        )
    }
}
