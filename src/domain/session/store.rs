//! Rolling in-process memory for dialogue sessions.
//!
//! One bounded turn list per chat, shared by every webhook task through
//! a single async lock. The store is the bot's only working memory:
//! restarts forget everything by design, and the durable transcript
//! lives behind a separate sink.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::ChatId;

use super::turn::Turn;

/// Maximum number of turns retained per chat.
///
/// Counted in turns, not exchanges: six turns hold roughly the last
/// three question/answer pairs.
pub const HISTORY_WINDOW: usize = 6;

/// In-process session memory keyed by chat.
///
/// Appends are atomic per key: the read-modify-evict sequence runs
/// under the write lock, so concurrent updates to one chat serialize
/// and the window bound always holds.
///
/// Entries live until process exit. Per-key expiry is the extension
/// point for long-running deployments where idle chats accumulate.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<ChatId, Vec<Turn>>>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns a snapshot of the chat's memory, oldest turn first.
    ///
    /// Unknown chats yield an empty history. The snapshot is detached:
    /// later appends do not mutate it.
    pub async fn history(&self, chat: ChatId) -> Vec<Turn> {
        let sessions = self.sessions.read().await;
        sessions.get(&chat).cloned().unwrap_or_default()
    }

    /// Appends a turn and returns the post-append snapshot.
    ///
    /// When the window is full the oldest turns are evicted first, so
    /// the returned snapshot never exceeds [`HISTORY_WINDOW`] turns and
    /// always ends with the turn just appended.
    pub async fn append(&self, chat: ChatId, turn: Turn) -> Vec<Turn> {
        let mut sessions = self.sessions.write().await;
        let turns = sessions.entry(chat).or_default();

        turns.push(turn);
        let overflow = turns.len().saturating_sub(HISTORY_WINDOW);
        if overflow > 0 {
            turns.drain(..overflow);
        }

        turns.clone()
    }
}
