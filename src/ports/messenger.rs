//! Outbound Messenger Port - Interface for message delivery.
//!
//! The controller hands finished text to this port and moves on.
//! Delivery failures are logged by the caller but never roll back
//! session state: the turn was produced, whether or not the platform
//! accepted it.

use async_trait::async_trait;

use crate::domain::foundation::ChatId;

/// Port for delivering outbound text to a chat.
#[async_trait]
pub trait OutboundMessenger: Send + Sync {
    /// Sends plain text to the chat.
    ///
    /// # Errors
    ///
    /// - [`SendError::Network`] on connect/transport failures
    /// - [`SendError::Rejected`] when the platform refuses the message
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), SendError>;
}

/// Message delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// Network error during delivery.
    #[error("network error: {0}")]
    Network(String),

    /// Platform rejected the message.
    #[error("delivery rejected ({status}): {description}")]
    Rejected {
        /// HTTP status returned by the platform.
        status: u16,
        /// Platform-supplied error description.
        description: String,
    },
}

impl SendError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a rejection error.
    pub fn rejected(status: u16, description: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            description: description.into(),
        }
    }
}
