//! Reply engine - the generate/validate/remember orchestration.
//!
//! One entry point per substantive message: append the user turn,
//! compose a prompt from the post-append memory, call the generation
//! provider, parse whatever comes back into a frame, remember the
//! produced reply, and offer both turns to the transcript sink. Every
//! failure mode degrades to a coherent reply; nothing here returns an
//! error to the caller.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::foundation::ChatId;
use crate::domain::frame;
use crate::domain::knowledge::DomainKnowledge;
use crate::domain::prompt::PromptComposer;
use crate::domain::session::{Role, SessionStore, Turn};
use crate::ports::{
    GenerateRequest, ReplyGenerator, TranscriptSink, DEFAULT_MAX_OUTPUT_TOKENS,
    DEFAULT_TEMPERATURE,
};

/// Result of one engine pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineReply {
    /// Text to deliver to the chat.
    pub text: String,
    /// Whether the frame asked for a human takeover.
    pub need_handoff: bool,
    /// True when the provider was unreachable and the fixed degraded
    /// reply was substituted.
    pub degraded: bool,
}

/// Orchestrates session memory, prompt composition, generation and
/// frame parsing for substantive messages.
pub struct ReplyEngine<G, T>
where
    G: ReplyGenerator,
    T: TranscriptSink,
{
    sessions: Arc<SessionStore>,
    knowledge: Arc<DomainKnowledge>,
    composer: PromptComposer,
    generator: Arc<G>,
    transcript: Arc<T>,
    max_output_tokens: u32,
    temperature: f32,
}

impl<G, T> ReplyEngine<G, T>
where
    G: ReplyGenerator + 'static,
    T: TranscriptSink + 'static,
{
    /// Creates an engine with the default generation bounds.
    pub fn new(
        sessions: Arc<SessionStore>,
        knowledge: Arc<DomainKnowledge>,
        generator: Arc<G>,
        transcript: Arc<T>,
    ) -> Self {
        let composer = PromptComposer::new(Arc::clone(&knowledge));
        Self {
            sessions,
            knowledge,
            composer,
            generator,
            transcript,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Overrides the output budget and sampling temperature.
    pub fn with_generation_bounds(mut self, max_output_tokens: u32, temperature: f32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self.temperature = temperature;
        self
    }

    /// Produces a reply to one substantive message.
    ///
    /// The user turn is appended before the provider call: a timeout
    /// or crash mid-generation must not lose the question from memory.
    /// The assistant turn is appended only after a result, degraded or
    /// not, is in hand.
    pub async fn respond(&self, chat: ChatId, message: &str) -> EngineReply {
        let memory = self.sessions.append(chat, Turn::user(message)).await;
        self.offer_transcript(chat, Role::User, message.to_string());

        let prompt = self.composer.compose(&memory, message);
        let request = GenerateRequest::new(prompt.system, prompt.user)
            .with_max_output_tokens(self.max_output_tokens)
            .with_temperature(self.temperature);

        let reply = match self.generator.generate(request).await {
            Ok(raw) => {
                let frame = frame::parse(&raw, &self.knowledge);
                debug!(
                    chat_id = chat.as_i64(),
                    intent = ?frame.intent,
                    state = ?frame.state,
                    need_handoff = frame.need_handoff,
                    "frame accepted"
                );

                let text = frame.outbound_text();
                let record = serde_json::to_string(&frame).unwrap_or_else(|_| text.clone());
                self.offer_transcript(chat, Role::Assistant, record);

                EngineReply {
                    text,
                    need_handoff: frame.need_handoff,
                    degraded: false,
                }
            }
            Err(e) => {
                error!(
                    chat_id = chat.as_i64(),
                    error = %e,
                    retryable = e.is_retryable(),
                    "generation failed, serving degraded reply"
                );

                let text = self.knowledge.degraded_reply.clone();
                self.offer_transcript(chat, Role::Assistant, text.clone());

                EngineReply {
                    text,
                    need_handoff: false,
                    degraded: true,
                }
            }
        };

        self.sessions.append(chat, Turn::assistant(&reply.text)).await;
        reply
    }

    /// Serves the fixed greeting, remembering it like any other reply.
    ///
    /// No generation call: first contact must be instant and free.
    pub async fn greet(&self, chat: ChatId) -> String {
        let greeting = self.knowledge.greeting.clone();
        self.sessions.append(chat, Turn::assistant(&greeting)).await;
        self.offer_transcript(chat, Role::Assistant, greeting.clone());
        greeting
    }

    /// Offers a row to the transcript sink without waiting for it.
    ///
    /// The write happens on its own task; a slow or failing sink can
    /// not delay or fail the reply path.
    fn offer_transcript(&self, chat: ChatId, role: Role, content: String) {
        let transcript = Arc::clone(&self.transcript);
        tokio::spawn(async move {
            if let Err(e) = transcript.record(chat, role, &content).await {
                tracing::warn!(
                    chat_id = chat.as_i64(),
                    role = role.as_str(),
                    error = %e,
                    "transcript row dropped"
                );
            }
        });
    }
}
