//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Reply generation providers (OpenAI, mock)
//! - `telegram` - Bot API client and webhook transport
//! - `transcript` - Transcript sinks (Postgres, in-memory, no-op)

pub mod ai;
pub mod telegram;
pub mod transcript;

pub use ai::{MockReplyGenerator, OpenAiConfig, OpenAiGenerator};
pub use telegram::{TelegramApi, TelegramApiConfig, WebhookState};
pub use transcript::{InMemoryTranscriptSink, NoopTranscriptSink, PgTranscriptSink};
