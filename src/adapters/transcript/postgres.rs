//! PostgreSQL implementation of TranscriptSink.
//!
//! Appends dialogue rows to the `messages` table. Row id and insert
//! time come from column defaults; the sink only carries what the
//! dialogue produced.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::ChatId;
use crate::domain::session::Role;
use crate::ports::{TranscriptError, TranscriptSink};

/// PostgreSQL implementation of TranscriptSink.
#[derive(Clone)]
pub struct PgTranscriptSink {
    pool: PgPool,
}

impl PgTranscriptSink {
    /// Creates a new PgTranscriptSink.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TranscriptSink for PgTranscriptSink {
    async fn record(
        &self,
        chat: ChatId,
        role: Role,
        content: &str,
    ) -> Result<(), TranscriptError> {
        sqlx::query(
            r#"
            INSERT INTO messages (chat_id, role, content)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(chat.as_i64())
        .bind(role.as_str())
        .bind(content)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        Ok(())
    }
}

/// Splits sqlx failures into unreachable-store vs refused-row.
fn classify(error: sqlx::Error) -> TranscriptError {
    match error {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            TranscriptError::unavailable(error.to_string())
        }
        _ => TranscriptError::write(format!("Failed to insert message: {error}")),
    }
}
