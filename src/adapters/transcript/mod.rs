//! Transcript sink adapters.
//!
//! Implementations of the TranscriptSink port.
//!
//! ## Available Adapters
//!
//! - `PgTranscriptSink` - Durable rows in PostgreSQL
//! - `NoopTranscriptSink` - Drops rows when no database is configured
//! - `InMemoryTranscriptSink` - Capturing sink for tests

mod memory;
mod noop;
mod postgres;

pub use memory::{InMemoryTranscriptSink, TranscriptRow};
pub use noop::NoopTranscriptSink;
pub use postgres::PgTranscriptSink;
