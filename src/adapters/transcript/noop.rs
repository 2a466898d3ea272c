//! No-op implementation of TranscriptSink.
//!
//! Used when no database is configured: the bot runs fully, it just
//! keeps no durable transcript.

use async_trait::async_trait;

use crate::domain::foundation::ChatId;
use crate::domain::session::Role;
use crate::ports::{TranscriptError, TranscriptSink};

/// Transcript sink that drops every row.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranscriptSink;

#[async_trait]
impl TranscriptSink for NoopTranscriptSink {
    async fn record(
        &self,
        _chat: ChatId,
        _role: Role,
        _content: &str,
    ) -> Result<(), TranscriptError> {
        Ok(())
    }
}
