//! Session module - Rolling dialogue memory.
//!
//! A session is the short working memory of one chat: a bounded list
//! of recent turns that grounds the next generated reply. Sessions are
//! process-local and volatile; the durable record is the transcript
//! sink's concern.

mod store;
mod turn;

pub use store::{SessionStore, HISTORY_WINDOW};
pub use turn::{Role, Turn, TURN_TEXT_LIMIT};
