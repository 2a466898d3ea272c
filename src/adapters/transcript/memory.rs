//! In-memory implementation of TranscriptSink for testing.
//!
//! Captures rows for assertion, with an optional always-fail mode for
//! exercising the best-effort contract.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::ChatId;
use crate::domain::session::Role;
use crate::ports::{TranscriptError, TranscriptSink};

/// One captured transcript row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRow {
    /// Chat the row belongs to.
    pub chat: ChatId,
    /// Who produced the content.
    pub role: Role,
    /// Recorded content.
    pub content: String,
}

/// In-memory transcript sink for tests.
#[derive(Debug, Default)]
pub struct InMemoryTranscriptSink {
    rows: RwLock<Vec<TranscriptRow>>,
    fail: bool,
}

impl InMemoryTranscriptSink {
    /// Creates a capturing sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that refuses every row.
    pub fn failing() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            fail: true,
        }
    }

    /// Returns all captured rows in arrival order.
    pub async fn rows(&self) -> Vec<TranscriptRow> {
        self.rows.read().await.clone()
    }

    /// Returns the number of captured rows.
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl TranscriptSink for InMemoryTranscriptSink {
    async fn record(
        &self,
        chat: ChatId,
        role: Role,
        content: &str,
    ) -> Result<(), TranscriptError> {
        if self.fail {
            return Err(TranscriptError::unavailable("sink configured to fail"));
        }

        self.rows.write().await.push(TranscriptRow {
            chat,
            role,
            content: content.to_string(),
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_rows_in_order() {
        let sink = InMemoryTranscriptSink::new();
        let chat = ChatId::new(1);

        sink.record(chat, Role::User, "вопрос").await.unwrap();
        sink.record(chat, Role::Assistant, "ответ").await.unwrap();

        let rows = sink.rows().await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].role, Role::User);
        assert_eq!(rows[0].content, "вопрос");
        assert_eq!(rows[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn failing_sink_refuses_rows() {
        let sink = InMemoryTranscriptSink::failing();

        let result = sink.record(ChatId::new(1), Role::User, "вопрос").await;

        assert!(result.is_err());
        assert_eq!(sink.row_count().await, 0);
    }
}
