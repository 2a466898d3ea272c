//! Telegram Bot API wire types for inbound updates.
//!
//! Deliberately partial: only the fields the bot reads are declared,
//! everything else in an update is ignored. Every field is optional so
//! that any shape Telegram delivers decodes; the controller decides
//! what is usable.

use serde::{Deserialize, Serialize};

use crate::application::InboundMessage;
use crate::domain::foundation::ChatId;

/// One webhook update.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonic update identifier, for log correlation.
    #[serde(default)]
    pub update_id: i64,
    /// New incoming message, when present.
    pub message: Option<IncomingMessage>,
    /// Button press on an inline keyboard, when present.
    pub callback_query: Option<CallbackQuery>,
}

/// Incoming message payload.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    /// Chat the message was sent in.
    pub chat: Option<Chat>,
    /// Text of the message, absent for stickers, photos and the like.
    pub text: Option<String>,
}

/// Chat descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Unique chat identifier (negative for groups).
    pub id: i64,
}

/// Inline keyboard button press.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    /// Message the button was attached to.
    pub message: Option<IncomingMessage>,
    /// Data associated with the pressed button.
    pub data: Option<String>,
}

impl Update {
    /// Flattens the update into the controller's transport-free shape.
    ///
    /// A message wins over a callback query; callback data is routed
    /// as if the user had typed it.
    pub fn into_inbound(self) -> InboundMessage {
        if let Some(message) = self.message {
            return InboundMessage {
                chat: message.chat.map(|c| ChatId::new(c.id)),
                text: message.text,
            };
        }

        if let Some(callback) = self.callback_query {
            return InboundMessage {
                chat: callback
                    .message
                    .and_then(|m| m.chat)
                    .map(|c| ChatId::new(c.id)),
                text: callback.data,
            };
        }

        InboundMessage {
            chat: None,
            text: None,
        }
    }
}

/// Body returned to Telegram for every webhook delivery.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    /// Whether the update was accepted.
    pub ok: bool,
    /// Refusal reason, present only on rejection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookAck {
    /// Acknowledges an accepted update.
    pub fn accepted() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    /// Refuses an update that failed the secret check.
    pub fn invalid_secret() -> Self {
        Self {
            ok: false,
            error: Some("invalid secret".to_string()),
        }
    }
}
