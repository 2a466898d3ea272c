//! Telegram adapters: Bot API client and webhook transport.

mod api;
mod dto;
mod handlers;
mod routes;

pub use api::{TelegramApi, TelegramApiConfig, ALLOWED_UPDATES};
pub use dto::{Update, WebhookAck};
pub use handlers::{WebhookState, SECRET_TOKEN_HEADER};
pub use routes::webhook_routes;
