//! Reply generator adapters.
//!
//! Implementations of the ReplyGenerator port.
//!
//! ## Available Adapters
//!
//! - `OpenAiGenerator` - OpenAI chat completions
//! - `MockReplyGenerator` - Configurable mock for testing

mod mock;
mod openai;

pub use mock::{MockOutcome, MockReplyGenerator};
pub use openai::{OpenAiConfig, OpenAiGenerator};
