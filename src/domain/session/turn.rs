//! Turn entity for dialogue sessions.
//!
//! Turns are immutable records of one user or assistant utterance.
//! Text is clipped at construction, so every stored turn already
//! satisfies the length bound.

use crate::domain::foundation::Timestamp;
use serde::{Deserialize, Serialize};

/// Maximum number of characters kept per turn.
///
/// Counted in characters rather than bytes: the bot speaks Russian and
/// a byte-level cut could split a code point.
pub const TURN_TEXT_LIMIT: usize = 2000;

/// Role of a turn's author within a dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Message received from the chat.
    User,
    /// Reply produced by the bot.
    Assistant,
}

impl Role {
    /// Returns the lowercase wire label for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// An immutable utterance within a dialogue session.
///
/// # Invariants
///
/// - `text` never exceeds [`TURN_TEXT_LIMIT`] characters
/// - `created_at` is set at construction and never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who produced the text.
    role: Role,

    /// The utterance, clipped to the turn limit.
    text: String,

    /// When the turn was recorded.
    created_at: Timestamp,
}

impl Turn {
    /// Creates a new turn, clipping oversized text to [`TURN_TEXT_LIMIT`].
    ///
    /// Clipping keeps the head of the text; a too-long message still
    /// contributes its opening to the rolling memory.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: Self::clip(text.into()),
            created_at: Timestamp::now(),
        }
    }

    /// Creates a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Creates an assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// Returns the author role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the clipped text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns when the turn was recorded.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    fn clip(text: String) -> String {
        if text.chars().count() <= TURN_TEXT_LIMIT {
            text
        } else {
            text.chars().take(TURN_TEXT_LIMIT).collect()
        }
    }
}
