//! Route definitions for the Telegram webhook.

use axum::{
    routing::{get, post},
    Router,
};

use crate::ports::{OutboundMessenger, ReplyGenerator, TranscriptSink};

use super::handlers::{self, WebhookState};

/// Creates the webhook router.
///
/// The caller supplies the state via `.with_state(...)`, which keeps
/// this function free of construction concerns.
pub fn webhook_routes<G, O, T>() -> Router<WebhookState<G, O, T>>
where
    G: ReplyGenerator + 'static,
    O: OutboundMessenger + 'static,
    T: TranscriptSink + 'static,
{
    Router::new()
        .route("/webhook", post(handlers::handle_update))
        .route("/health", get(handlers::health))
}
