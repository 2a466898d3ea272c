//! Dialogue controller - routes inbound messages to the right path.
//!
//! Three paths, decided before any expensive work: unusable updates
//! are dropped, `/start` gets the fixed greeting without touching the
//! generator, everything else goes through the reply engine. Delivery
//! and handoff escalation live here so the engine stays transport-free.

use std::sync::Arc;

use tracing::debug;

use crate::application::command::Command;
use crate::application::engine::ReplyEngine;
use crate::domain::foundation::ChatId;
use crate::ports::{OutboundMessenger, ReplyGenerator, TranscriptSink};

/// One inbound message, flattened from the transport update.
///
/// Both fields are optional because transports deliver partial
/// updates; the controller decides what is usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Originating chat, when the update carried one.
    pub chat: Option<ChatId>,
    /// Message text, when the update carried any.
    pub text: Option<String>,
}

/// What the controller did with one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Update was unusable; nothing was sent.
    Ignored,
    /// `/start` was served the fixed greeting.
    Greeted,
    /// A substantive message went through the engine.
    Replied {
        /// True when the degraded reply was substituted.
        degraded: bool,
    },
}

/// Routes inbound messages and owns outbound delivery.
pub struct DialogueController<G, O, T>
where
    G: ReplyGenerator,
    O: OutboundMessenger,
    T: TranscriptSink,
{
    engine: ReplyEngine<G, T>,
    messenger: Arc<O>,
    sales_manager: Option<ChatId>,
}

impl<G, O, T> DialogueController<G, O, T>
where
    G: ReplyGenerator + 'static,
    O: OutboundMessenger,
    T: TranscriptSink + 'static,
{
    /// Creates a controller with no handoff escalation target.
    pub fn new(engine: ReplyEngine<G, T>, messenger: Arc<O>) -> Self {
        Self {
            engine,
            messenger,
            sales_manager: None,
        }
    }

    /// Sets the chat that receives handoff notes.
    pub fn with_sales_manager(mut self, chat: ChatId) -> Self {
        self.sales_manager = Some(chat);
        self
    }

    /// Handles one inbound message end to end.
    ///
    /// Never fails: unusable input is ignored, and delivery errors are
    /// logged rather than surfaced, so the transport can acknowledge
    /// the update unconditionally.
    pub async fn dispatch(&self, inbound: InboundMessage) -> DispatchOutcome {
        let Some(chat) = inbound.chat else {
            debug!("update without chat id ignored");
            return DispatchOutcome::Ignored;
        };

        let text = inbound.text.unwrap_or_default();
        let text = text.trim();
        if text.is_empty() {
            debug!(chat_id = chat.as_i64(), "update without text ignored");
            return DispatchOutcome::Ignored;
        }

        match Command::recognize(text) {
            Some(Command::Start) => {
                let greeting = self.engine.greet(chat).await;
                self.deliver(chat, &greeting).await;
                DispatchOutcome::Greeted
            }
            None => {
                let reply = self.engine.respond(chat, text).await;
                self.deliver(chat, &reply.text).await;
                if reply.need_handoff {
                    self.escalate(chat, text).await;
                }
                DispatchOutcome::Replied {
                    degraded: reply.degraded,
                }
            }
        }
    }

    /// Sends text to a chat, logging delivery failures.
    async fn deliver(&self, chat: ChatId, text: &str) {
        if let Err(e) = self.messenger.send_text(chat, text).await {
            tracing::error!(chat_id = chat.as_i64(), error = %e, "delivery failed");
        }
    }

    /// Notifies the sales manager chat about a handoff request.
    async fn escalate(&self, chat: ChatId, message: &str) {
        let Some(manager) = self.sales_manager else {
            debug!(chat_id = chat.as_i64(), "handoff requested, no manager chat configured");
            return;
        };

        let note = format!(
            "Нужен менеджер: клиент в чате {chat} запросил передачу диалога.\n\nСообщение клиента: {message}"
        );
        if let Err(e) = self.messenger.send_text(manager, &note).await {
            tracing::warn!(
                chat_id = chat.as_i64(),
                manager_chat_id = manager.as_i64(),
                error = %e,
                "handoff note not delivered"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockReplyGenerator;
    use crate::adapters::transcript::InMemoryTranscriptSink;
    use crate::domain::knowledge::DomainKnowledge;
    use crate::domain::session::{Role, SessionStore};
    use crate::ports::{GenerateError, SendError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    // ─────────────────────────── Test Doubles ───────────────────────────

    struct RecordingMessenger {
        sent: Mutex<Vec<(ChatId, String)>>,
        fail: bool,
    }

    impl RecordingMessenger {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn sent(&self) -> Vec<(ChatId, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OutboundMessenger for RecordingMessenger {
        async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), SendError> {
            self.sent.lock().unwrap().push((chat, text.to_string()));
            if self.fail {
                return Err(SendError::network("wire down"));
            }
            Ok(())
        }
    }

    struct Harness {
        controller: DialogueController<MockReplyGenerator, RecordingMessenger, InMemoryTranscriptSink>,
        sessions: Arc<SessionStore>,
        messenger: Arc<RecordingMessenger>,
        // Clone of the mock moved into the engine; shares its call log.
        generator: MockReplyGenerator,
    }

    fn harness(generator: MockReplyGenerator, messenger: RecordingMessenger) -> Harness {
        let sessions = Arc::new(SessionStore::new());
        let messenger = Arc::new(messenger);
        let engine = ReplyEngine::new(
            Arc::clone(&sessions),
            Arc::new(DomainKnowledge::standard()),
            Arc::new(generator.clone()),
            Arc::new(InMemoryTranscriptSink::new()),
        );
        Harness {
            controller: DialogueController::new(engine, Arc::clone(&messenger)),
            sessions,
            messenger,
            generator,
        }
    }

    fn chat(id: i64) -> ChatId {
        ChatId::new(id)
    }

    fn inbound(chat_id: i64, text: &str) -> InboundMessage {
        InboundMessage {
            chat: Some(chat(chat_id)),
            text: Some(text.to_string()),
        }
    }

    fn frame_json(reply: &str) -> String {
        json!({"reply": reply, "intent": "consult_request", "state": "qa"}).to_string()
    }

    fn handoff_frame_json() -> String {
        json!({
            "reply": "Передаю менеджеру.",
            "intent": "booking_request",
            "state": "handoff",
            "need_handoff": true
        })
        .to_string()
    }

    // ─────────────────────────── Start Command ───────────────────────────

    mod start_command {
        use super::*;

        #[tokio::test]
        async fn start_is_greeted_without_generation() {
            let h = harness(MockReplyGenerator::new(), RecordingMessenger::new());

            let outcome = h.controller.dispatch(inbound(1, "/start")).await;

            assert_eq!(outcome, DispatchOutcome::Greeted);
            let sent = h.messenger.sent();
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].0, chat(1));
            assert_eq!(sent[0].1, DomainKnowledge::standard().greeting);
            assert_eq!(h.generator.call_count(), 0);
        }

        #[tokio::test]
        async fn greeting_is_remembered_as_an_assistant_turn() {
            let h = harness(MockReplyGenerator::new(), RecordingMessenger::new());

            h.controller.dispatch(inbound(1, "/start")).await;

            let memory = h.sessions.history(chat(1)).await;
            assert_eq!(memory.len(), 1);
            assert_eq!(memory[0].role(), Role::Assistant);
        }

        #[tokio::test]
        async fn repeated_start_greets_again() {
            let h = harness(MockReplyGenerator::new(), RecordingMessenger::new());

            let first = h.controller.dispatch(inbound(1, "/start")).await;
            let second = h.controller.dispatch(inbound(1, "/start")).await;

            assert_eq!(first, DispatchOutcome::Greeted);
            assert_eq!(second, DispatchOutcome::Greeted);
            assert_eq!(h.messenger.sent().len(), 2);
            assert_eq!(h.sessions.history(chat(1)).await.len(), 2);
        }

        #[tokio::test]
        async fn start_with_bot_mention_is_still_greeted() {
            let h = harness(MockReplyGenerator::new(), RecordingMessenger::new());

            let outcome = h
                .controller
                .dispatch(inbound(1, "/start@jurconsult_bot"))
                .await;

            assert_eq!(outcome, DispatchOutcome::Greeted);
        }
    }

    // ─────────────────────────── Unusable Updates ───────────────────────────

    mod unusable_updates {
        use super::*;

        #[tokio::test]
        async fn missing_chat_is_ignored() {
            let h = harness(MockReplyGenerator::new(), RecordingMessenger::new());

            let outcome = h
                .controller
                .dispatch(InboundMessage {
                    chat: None,
                    text: Some("привет".to_string()),
                })
                .await;

            assert_eq!(outcome, DispatchOutcome::Ignored);
            assert!(h.messenger.sent().is_empty());
            assert_eq!(h.generator.call_count(), 0);
        }

        #[tokio::test]
        async fn missing_text_is_ignored() {
            let h = harness(MockReplyGenerator::new(), RecordingMessenger::new());

            let outcome = h
                .controller
                .dispatch(InboundMessage {
                    chat: Some(chat(1)),
                    text: None,
                })
                .await;

            assert_eq!(outcome, DispatchOutcome::Ignored);
            assert!(h.messenger.sent().is_empty());
        }

        #[tokio::test]
        async fn whitespace_only_text_is_ignored() {
            let h = harness(MockReplyGenerator::new(), RecordingMessenger::new());

            let outcome = h.controller.dispatch(inbound(1, "   \n\t ")).await;

            assert_eq!(outcome, DispatchOutcome::Ignored);
            assert!(h.messenger.sent().is_empty());
            assert!(h.sessions.history(chat(1)).await.is_empty());
        }
    }

    // ─────────────────────────── Substantive Messages ───────────────────────────

    mod substantive_messages {
        use super::*;

        #[tokio::test]
        async fn freeform_text_goes_through_the_engine() {
            let generator = MockReplyGenerator::new().with_response(frame_json("Расскажу."));
            let h = harness(generator, RecordingMessenger::new());

            let outcome = h
                .controller
                .dispatch(inbound(1, "нужна проверка договора"))
                .await;

            assert_eq!(outcome, DispatchOutcome::Replied { degraded: false });
            let sent = h.messenger.sent();
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].1, "Расскажу.");
        }

        #[tokio::test]
        async fn unknown_slash_command_is_treated_as_text() {
            let generator = MockReplyGenerator::new().with_response(frame_json("Отвечаю."));
            let h = harness(generator, RecordingMessenger::new());

            let outcome = h.controller.dispatch(inbound(1, "/help")).await;

            assert_eq!(outcome, DispatchOutcome::Replied { degraded: false });
            assert_eq!(h.generator.call_count(), 1);
        }

        #[tokio::test]
        async fn provider_failure_surfaces_as_degraded() {
            let generator = MockReplyGenerator::new().with_error(GenerateError::timeout(30));
            let h = harness(generator, RecordingMessenger::new());

            let outcome = h.controller.dispatch(inbound(1, "вопрос")).await;

            assert_eq!(outcome, DispatchOutcome::Replied { degraded: true });
            let sent = h.messenger.sent();
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].1, DomainKnowledge::standard().degraded_reply);
        }

        #[tokio::test]
        async fn delivery_failure_does_not_change_the_outcome() {
            let generator = MockReplyGenerator::new().with_response(frame_json("Ответ."));
            let h = harness(generator, RecordingMessenger::failing());

            let outcome = h.controller.dispatch(inbound(1, "вопрос")).await;

            assert_eq!(outcome, DispatchOutcome::Replied { degraded: false });
            // The turn is still remembered even though the wire dropped it.
            assert_eq!(h.sessions.history(chat(1)).await.len(), 2);
        }
    }

    // ─────────────────────────── Handoff Escalation ───────────────────────────

    mod handoff_escalation {
        use super::*;

        #[tokio::test]
        async fn handoff_notifies_the_manager_chat() {
            let generator = MockReplyGenerator::new().with_response(handoff_frame_json());
            let mut h = harness(generator, RecordingMessenger::new());
            h.controller = h.controller.with_sales_manager(chat(999));

            h.controller.dispatch(inbound(42, "позовите человека")).await;

            let sent = h.messenger.sent();
            assert_eq!(sent.len(), 2);
            assert_eq!(sent[0].0, chat(42));
            assert_eq!(sent[1].0, chat(999));
            assert!(sent[1].1.contains("чате 42"));
            assert!(sent[1].1.contains("позовите человека"));
        }

        #[tokio::test]
        async fn handoff_without_manager_chat_sends_nothing_extra() {
            let generator = MockReplyGenerator::new().with_response(handoff_frame_json());
            let h = harness(generator, RecordingMessenger::new());

            h.controller.dispatch(inbound(42, "позовите человека")).await;

            assert_eq!(h.messenger.sent().len(), 1);
        }

        #[tokio::test]
        async fn plain_reply_never_escalates() {
            let generator = MockReplyGenerator::new().with_response(frame_json("Ответ."));
            let mut h = harness(generator, RecordingMessenger::new());
            h.controller = h.controller.with_sales_manager(chat(999));

            h.controller.dispatch(inbound(1, "вопрос")).await;

            let sent = h.messenger.sent();
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].0, chat(1));
        }
    }
}
