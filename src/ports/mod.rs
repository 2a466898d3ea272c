//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Ports
//!
//! - `ReplyGenerator` - Generation provider call (the only suspension
//!   point with externally-variable latency)
//! - `OutboundMessenger` - Delivery of finished text to the chat
//! - `TranscriptSink` - Best-effort durable dialogue log

mod generator;
mod messenger;
mod transcript;

pub use generator::{
    GenerateError, GenerateRequest, ReplyGenerator, DEFAULT_MAX_OUTPUT_TOKENS,
    DEFAULT_TEMPERATURE,
};
pub use messenger::{OutboundMessenger, SendError};
pub use transcript::{TranscriptError, TranscriptSink};
