//! HTTP handlers for the Telegram webhook.
//!
//! The secret check runs before anything else touches the update; a
//! mismatch answers 401 without parsing further. Everything that
//! passes the gate is acknowledged 200 regardless of what the
//! controller made of it, so the platform never re-delivers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, Secret};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::application::DialogueController;
use crate::ports::{OutboundMessenger, ReplyGenerator, TranscriptSink};

use super::dto::{Update, WebhookAck};

/// Header Telegram echoes the configured webhook secret in.
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for the webhook routes.
pub struct WebhookState<G, O, T>
where
    G: ReplyGenerator,
    O: OutboundMessenger,
    T: TranscriptSink,
{
    controller: Arc<DialogueController<G, O, T>>,
    secret: Arc<Secret<String>>,
}

impl<G, O, T> WebhookState<G, O, T>
where
    G: ReplyGenerator,
    O: OutboundMessenger,
    T: TranscriptSink,
{
    /// Creates webhook state around a controller and the shared secret.
    pub fn new(controller: Arc<DialogueController<G, O, T>>, secret: Secret<String>) -> Self {
        Self {
            controller,
            secret: Arc::new(secret),
        }
    }
}

impl<G, O, T> Clone for WebhookState<G, O, T>
where
    G: ReplyGenerator,
    O: OutboundMessenger,
    T: TranscriptSink,
{
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
            secret: Arc::clone(&self.secret),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /webhook - one update delivery from the platform.
pub async fn handle_update<G, O, T>(
    State(state): State<WebhookState<G, O, T>>,
    headers: HeaderMap,
    Json(update): Json<Update>,
) -> Response
where
    G: ReplyGenerator + 'static,
    O: OutboundMessenger + 'static,
    T: TranscriptSink + 'static,
{
    let provided = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !constant_time_compare(
        provided.as_bytes(),
        state.secret.expose_secret().as_bytes(),
    ) {
        return (StatusCode::UNAUTHORIZED, Json(WebhookAck::invalid_secret())).into_response();
    }

    let update_id = update.update_id;
    let outcome = state.controller.dispatch(update.into_inbound()).await;
    debug!(update_id, outcome = ?outcome, "update handled");

    (StatusCode::OK, Json(WebhookAck::accepted())).into_response()
}

/// GET /health - liveness probe.
pub async fn health() -> Response {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"}))).into_response()
}

/// Performs constant-time comparison of two byte slices.
///
/// This prevents timing attacks that could leak information about the
/// expected secret.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
