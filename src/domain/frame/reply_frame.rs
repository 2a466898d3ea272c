//! Structured reply contract returned by the generation step.
//!
//! A frame carries the user-facing text plus the classification and
//! workflow annotations the model returns alongside it. Frames are
//! built fresh per generation call and never mutated; the engine only
//! reads them to derive outbound text and a transcript record.

use serde::{Deserialize, Serialize};

use crate::domain::knowledge::DomainKnowledge;

/// Fixed price marker used in offers.
///
/// The practice quotes prices individually, so the catalog and every
/// generated offer carry this marker instead of a number.
pub const PRICE_MARKER: &str = "individual";

/// What the user is asking for, as classified by the model.
///
/// Unrecognized labels fold into `Unknown` rather than failing the
/// frame; classification is advisory, not load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Wants legal help with a concrete situation.
    ConsultRequest,
    /// Asks what the services cost.
    PriceRequest,
    /// Ready to book a consultation.
    BookingRequest,
    /// Greeting or chatter without a legal question.
    Smalltalk,
    /// Anything the model could not classify.
    #[serde(other)]
    Unknown,
}

/// Where the model believes the dialogue currently stands.
///
/// An annotation per reply, not enforced session state: each message
/// is handled independently and the next frame may claim any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogState {
    /// No active thread.
    Idle,
    /// Clarifying questions are being asked.
    Qa,
    /// A package offer is on the table.
    Offer,
    /// Booking details are being settled.
    Booking,
    /// A human should take over.
    Handoff,
}

/// Service package tier offered by the practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageKind {
    /// Short oral consultation.
    Express,
    /// Written document review with a risk memo.
    Review,
    /// Full deal support.
    Turnkey,
}

/// A concrete package offer surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Which package is being offered.
    pub package: PackageKind,
    /// Selling points for this package.
    #[serde(default)]
    pub bullets: Vec<String>,
    /// Always the fixed marker; prices are quoted individually.
    #[serde(default = "default_price")]
    pub price: String,
}

fn default_price() -> String {
    PRICE_MARKER.to_string()
}

/// The structured contract a generation call is expected to return.
///
/// # Invariants
///
/// - `reply`, `intent`, `state` are always present; a document missing
///   any of them never becomes a frame (the parser substitutes the
///   fallback instead)
/// - `cta`, when present, is non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyFrame {
    /// User-facing reply text.
    pub reply: String,
    /// Classified intent of the inbound message.
    pub intent: Intent,
    /// Claimed dialogue state.
    pub state: DialogState,
    /// Whether a human should take over this chat.
    #[serde(default)]
    pub need_handoff: bool,
    /// Clarifying questions to surface, possibly empty.
    #[serde(default)]
    pub questions: Vec<String>,
    /// Package offer, when the model decided to make one.
    #[serde(default)]
    pub offer: Option<Offer>,
    /// Qualification slots the model extracted or wants filled.
    #[serde(default)]
    pub slots: Option<Vec<String>>,
    /// Call-to-action appended to the reply.
    #[serde(default)]
    pub cta: Option<String>,
}

impl ReplyFrame {
    /// Builds the deterministic substitute frame used when provider
    /// output fails validation.
    ///
    /// The fallback asks a generic clarifying question, carries the
    /// first two entries of the question bank and slot samples, and
    /// keeps the default call-to-action so the conversation still
    /// moves toward a booking.
    pub fn fallback(knowledge: &DomainKnowledge) -> Self {
        Self {
            reply: knowledge.fallback_reply.clone(),
            intent: Intent::Unknown,
            state: DialogState::Qa,
            need_handoff: false,
            questions: knowledge.questions.iter().take(2).cloned().collect(),
            offer: None,
            slots: Some(knowledge.slot_samples.iter().take(2).cloned().collect()),
            cta: Some(knowledge.default_cta.clone()),
        }
    }

    /// Derives the text sent back to the chat: the reply, with the
    /// call-to-action appended after a blank line when present.
    pub fn outbound_text(&self) -> String {
        match &self.cta {
            Some(cta) => format!("{}\n\n{}", self.reply, cta),
            None => self.reply.clone(),
        }
    }
}
