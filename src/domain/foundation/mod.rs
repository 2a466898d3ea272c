//! Foundation module - Shared domain primitives.
//!
//! Contains the identifier and timestamp value objects that form
//! the vocabulary of the dialogue domain.

mod ids;
mod timestamp;

pub use ids::ChatId;
pub use timestamp::Timestamp;
