//! Transcript Sink Port - Interface for the durable dialogue log.
//!
//! The transcript is a side-channel: every user message and every
//! produced reply is offered to the sink, but a failed write never
//! blocks or fails the reply path. At-least-once, best-effort.

use async_trait::async_trait;

use crate::domain::foundation::ChatId;
use crate::domain::session::Role;

/// Port for recording dialogue rows.
#[async_trait]
pub trait TranscriptSink: Send + Sync {
    /// Records one role-tagged row for a chat.
    ///
    /// # Errors
    ///
    /// - [`TranscriptError::Unavailable`] when the store cannot be reached
    /// - [`TranscriptError::Write`] when the row was refused
    async fn record(&self, chat: ChatId, role: Role, content: &str)
        -> Result<(), TranscriptError>;
}

/// Transcript persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    /// Store cannot be reached.
    #[error("transcript store unavailable: {0}")]
    Unavailable(String),

    /// Row was refused by the store.
    #[error("transcript write failed: {0}")]
    Write(String),
}

impl TranscriptError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a write error.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_correctly() {
        assert_eq!(
            TranscriptError::unavailable("pool exhausted").to_string(),
            "transcript store unavailable: pool exhausted"
        );
        assert_eq!(
            TranscriptError::write("relation missing").to_string(),
            "transcript write failed: relation missing"
        );
    }
}
