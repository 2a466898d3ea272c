//! Reserved command recognition.
//!
//! A small closed set of slash commands gets a deterministic fast
//! path; everything else is freeform text for the reply engine.
//! Recognition is a tagged dispatch on the first token, so group-chat
//! forms like `/start@jurconsult_bot` and deep-link payloads like
//! `/start ref42` still hit the fast path.

/// Commands handled without a generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// First-contact greeting.
    Start,
}

impl Command {
    /// Recognizes a reserved command at the head of the text.
    ///
    /// Returns `None` for freeform text, including unknown slash
    /// commands: those still deserve a generated reply rather than
    /// silence.
    pub fn recognize(text: &str) -> Option<Command> {
        let head = text.trim().split_whitespace().next()?;
        let head = head.split('@').next().unwrap_or(head);

        match head {
            "/start" => Some(Command::Start),
            _ => None,
        }
    }
}
