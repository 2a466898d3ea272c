//! Prompt composition for generation calls.
//!
//! Turns (rolling memory, new message, static knowledge) into the two
//! halves of a generation request: the system half with instructions
//! and the serialized knowledge digest, and the user half with the
//! dialogue history and the current message. Composition is pure; the
//! same inputs always yield the same prompt.

use std::sync::Arc;

use crate::domain::knowledge::DomainKnowledge;
use crate::domain::session::Turn;

/// Label introducing the rolling history in the user half.
const HISTORY_LABEL: &str = "История диалога:";

/// Label introducing the new message in the user half.
const CURRENT_MESSAGE_LABEL: &str = "Текущее сообщение:";

/// The two halves of a composed generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    /// Instructions plus serialized domain knowledge.
    pub system: String,
    /// Joined rolling memory plus the labeled current message.
    pub user: String,
}

/// Builds generation prompts from session memory and static knowledge.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    knowledge: Arc<DomainKnowledge>,
}

impl PromptComposer {
    /// Creates a composer over the shared knowledge bundle.
    pub fn new(knowledge: Arc<DomainKnowledge>) -> Self {
        Self { knowledge }
    }

    /// Composes the request for one generation call.
    ///
    /// `memory` is rendered oldest first, one `role: text` line per
    /// turn, followed by the new message under its own label.
    pub fn compose(&self, memory: &[Turn], message: &str) -> ComposedPrompt {
        ComposedPrompt {
            system: self.system_half(),
            user: Self::user_half(memory, message),
        }
    }

    fn system_half(&self) -> String {
        let digest = serde_json::json!({
            "packages": self.knowledge.packages,
            "questions": self.knowledge.questions,
            "slot_samples": self.knowledge.slot_samples,
            "default_cta": self.knowledge.default_cta,
        });

        format!(
            "{}\n\nСправочник (JSON): {}",
            self.knowledge.system_prompt, digest
        )
    }

    fn user_half(memory: &[Turn], message: &str) -> String {
        let mut lines = Vec::with_capacity(memory.len() + 4);
        lines.push(HISTORY_LABEL.to_string());
        for turn in memory {
            lines.push(format!("{}: {}", turn.role().as_str(), turn.text()));
        }
        lines.push(String::new());
        lines.push(CURRENT_MESSAGE_LABEL.to_string());
        lines.push(message.to_string());

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer() -> PromptComposer {
        PromptComposer::new(Arc::new(DomainKnowledge::standard()))
    }

    #[test]
    fn system_half_opens_with_the_instructions() {
        let prompt = composer().compose(&[], "вопрос");
        let knowledge = DomainKnowledge::standard();

        assert!(prompt.system.starts_with(&knowledge.system_prompt));
    }

    #[test]
    fn system_half_serializes_the_knowledge_digest() {
        let prompt = composer().compose(&[], "вопрос");

        assert!(prompt.system.contains("Справочник (JSON):"));
        assert!(prompt.system.contains("Экспресс-консультация"));
        assert!(prompt.system.contains("slot_samples"));
    }

    #[test]
    fn user_half_lists_turns_oldest_first_with_role_labels() {
        let memory = vec![
            Turn::user("нужна консультация"),
            Turn::assistant("Уточните юрисдикцию."),
        ];

        let prompt = composer().compose(&memory, "KZ, договор поставки");

        let expected = "История диалога:\n\
                        user: нужна консультация\n\
                        assistant: Уточните юрисдикцию.\n\
                        \n\
                        Текущее сообщение:\n\
                        KZ, договор поставки";
        assert_eq!(prompt.user, expected);
    }

    #[test]
    fn empty_memory_yields_no_history_lines() {
        let prompt = composer().compose(&[], "первое сообщение");

        let expected = "История диалога:\n\nТекущее сообщение:\nпервое сообщение";
        assert_eq!(prompt.user, expected);
    }

    #[test]
    fn current_message_comes_last() {
        let memory = vec![Turn::user("раньше")];
        let prompt = composer().compose(&memory, "сейчас");

        assert!(prompt.user.ends_with("Текущее сообщение:\nсейчас"));
    }

    #[test]
    fn composition_is_deterministic() {
        let memory = vec![Turn::user("привет")];
        let composer = composer();

        let first = composer.compose(&memory, "вопрос");
        let second = composer.compose(&memory, "вопрос");

        assert_eq!(first, second);
    }
}
