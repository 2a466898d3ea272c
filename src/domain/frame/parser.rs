//! Total parser for raw provider output.
//!
//! `parse` never fails and never panics: any input that violates the
//! required contract folds into the fallback frame. The required trio
//! (`reply`, `intent`, `state`) is checked strictly for presence and
//! string type; every optional structure decodes best-effort and
//! degrades to its empty form when malformed. A frame with a broken
//! `offer` is still a usable frame.

use serde_json::Value;

use crate::domain::knowledge::DomainKnowledge;

use super::reply_frame::{DialogState, Intent, Offer, ReplyFrame};

/// Parses raw generation output into a frame.
///
/// Returns the fallback frame when the input is not a JSON object or
/// any of `reply`, `intent`, `state` is absent or not a string. A
/// blank `reply` counts as absent: the chat API rejects empty text,
/// so such a frame is unusable as-is. Any
/// string is accepted for `intent` and `state`: unrecognized intent
/// labels fold to [`Intent::Unknown`] and unrecognized state labels to
/// [`DialogState::Qa`], matching the fallback frame's posture.
pub fn parse(raw: &str, knowledge: &DomainKnowledge) -> ReplyFrame {
    try_parse(raw).unwrap_or_else(|| ReplyFrame::fallback(knowledge))
}

fn try_parse(raw: &str) -> Option<ReplyFrame> {
    let value: Value = serde_json::from_str(raw).ok()?;

    let reply = value.get("reply")?.as_str()?;
    if reply.trim().is_empty() {
        return None;
    }
    let reply = reply.to_string();
    let intent = decode_enum(value.get("intent")?, Intent::Unknown)?;
    let state = decode_enum(value.get("state")?, DialogState::Qa)?;

    let need_handoff = value
        .get("need_handoff")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let questions = value
        .get("questions")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();

    let offer = value
        .get("offer")
        .and_then(|v| serde_json::from_value::<Offer>(v.clone()).ok());

    let slots = value
        .get("slots")
        .and_then(|v| serde_json::from_value::<Vec<String>>(v.clone()).ok());

    // Empty cta folds to absent so the engine never appends a blank
    // call-to-action block.
    let cta = value
        .get("cta")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Some(ReplyFrame {
        reply,
        intent,
        state,
        need_handoff,
        questions,
        offer,
        slots,
        cta,
    })
}

/// Decodes an enum field that must be a string on the wire.
///
/// Returns `None` for non-string values (required-field violation) and
/// `unrecognized` for string labels outside the enum.
fn decode_enum<T>(value: &Value, unrecognized: T) -> Option<T>
where
    T: serde::de::DeserializeOwned,
{
    value.as_str()?;
    Some(serde_json::from_value(value.clone()).unwrap_or(unrecognized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn knowledge() -> DomainKnowledge {
        DomainKnowledge::standard()
    }

    fn parse_str(raw: &str) -> ReplyFrame {
        parse(raw, &knowledge())
    }

    // ─── Fallback Cases ──────────────────────────────────────────────

    #[test]
    fn empty_string_yields_fallback() {
        let frame = parse_str("");
        assert_eq!(frame, ReplyFrame::fallback(&knowledge()));
    }

    #[test]
    fn plain_text_yields_fallback() {
        let frame = parse_str("к сожалению, я не могу вернуть JSON");
        assert_eq!(frame.intent, Intent::Unknown);
        assert_eq!(frame.state, DialogState::Qa);
        assert_eq!(frame.reply, knowledge().fallback_reply);
    }

    #[test]
    fn truncated_json_yields_fallback() {
        let frame = parse_str(r#"{"reply": "Здравствуйте, я могу"#);
        assert_eq!(frame, ReplyFrame::fallback(&knowledge()));
    }

    #[test]
    fn json_array_yields_fallback() {
        let frame = parse_str(r#"["reply", "intent", "state"]"#);
        assert_eq!(frame, ReplyFrame::fallback(&knowledge()));
    }

    #[test]
    fn missing_reply_yields_fallback() {
        let raw = json!({"intent": "smalltalk", "state": "idle"}).to_string();
        assert_eq!(parse_str(&raw), ReplyFrame::fallback(&knowledge()));
    }

    #[test]
    fn missing_intent_yields_fallback() {
        let raw = json!({"reply": "Привет", "state": "idle"}).to_string();
        assert_eq!(parse_str(&raw), ReplyFrame::fallback(&knowledge()));
    }

    #[test]
    fn missing_state_yields_fallback() {
        let raw = json!({"reply": "Привет", "intent": "smalltalk"}).to_string();
        assert_eq!(parse_str(&raw), ReplyFrame::fallback(&knowledge()));
    }

    #[test]
    fn blank_reply_yields_fallback() {
        for reply in ["", "   ", "\n\t "] {
            let raw = json!({"reply": reply, "intent": "smalltalk", "state": "idle"}).to_string();
            assert_eq!(parse_str(&raw), ReplyFrame::fallback(&knowledge()));
        }
    }

    #[test]
    fn numeric_reply_yields_fallback() {
        let raw = json!({"reply": 42, "intent": "smalltalk", "state": "idle"}).to_string();
        assert_eq!(parse_str(&raw), ReplyFrame::fallback(&knowledge()));
    }

    #[test]
    fn numeric_intent_yields_fallback() {
        let raw = json!({"reply": "Привет", "intent": 7, "state": "idle"}).to_string();
        assert_eq!(parse_str(&raw), ReplyFrame::fallback(&knowledge()));
    }

    #[test]
    fn fallback_carries_knowledge_texts() {
        let frame = parse_str("мусор");
        let knowledge = knowledge();

        assert_eq!(frame.reply, knowledge.fallback_reply);
        assert_eq!(frame.cta.as_deref(), Some(knowledge.default_cta.as_str()));
        assert_eq!(frame.questions, &knowledge.questions[..2]);
        assert_eq!(frame.slots.as_deref(), Some(&knowledge.slot_samples[..2]));
    }

    // ─── Accepted Frames ─────────────────────────────────────────────

    #[test]
    fn minimal_valid_frame_is_accepted() {
        let raw = json!({
            "reply": "Чем могу помочь?",
            "intent": "smalltalk",
            "state": "idle"
        })
        .to_string();

        let frame = parse_str(&raw);

        assert_eq!(frame.reply, "Чем могу помочь?");
        assert_eq!(frame.intent, Intent::Smalltalk);
        assert_eq!(frame.state, DialogState::Idle);
        assert!(!frame.need_handoff);
        assert!(frame.questions.is_empty());
        assert!(frame.offer.is_none());
    }

    #[test]
    fn full_valid_frame_is_accepted() {
        let raw = json!({
            "reply": "Предлагаю проверку договора.",
            "intent": "consult_request",
            "state": "offer",
            "need_handoff": true,
            "questions": ["Какая сумма сделки?"],
            "offer": {
                "package": "review",
                "bullets": ["Анализ договора", "Заключение"],
                "price": "individual"
            },
            "slots": ["контрагент", "сумма"],
            "cta": "Напишите «бронь»."
        })
        .to_string();

        let frame = parse_str(&raw);

        assert_eq!(frame.intent, Intent::ConsultRequest);
        assert_eq!(frame.state, DialogState::Offer);
        assert!(frame.need_handoff);
        assert_eq!(frame.questions.len(), 1);
        let offer = frame.offer.unwrap();
        assert_eq!(offer.package, crate::domain::frame::PackageKind::Review);
        assert_eq!(offer.bullets.len(), 2);
        assert_eq!(frame.slots.unwrap(), vec!["контрагент", "сумма"]);
        assert_eq!(frame.cta.as_deref(), Some("Напишите «бронь»."));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let raw = json!({
            "reply": "Ок",
            "intent": "smalltalk",
            "state": "idle",
            "confidence": 0.93,
            "debug": {"tokens": 17}
        })
        .to_string();

        let frame = parse_str(&raw);
        assert_eq!(frame.reply, "Ок");
    }

    // ─── Lenient Degradation ─────────────────────────────────────────

    #[test]
    fn unknown_intent_label_keeps_the_frame() {
        let raw = json!({
            "reply": "Вот прогноз погоды",
            "intent": "weather_report",
            "state": "idle"
        })
        .to_string();

        let frame = parse_str(&raw);

        assert_eq!(frame.reply, "Вот прогноз погоды");
        assert_eq!(frame.intent, Intent::Unknown);
    }

    #[test]
    fn unknown_state_label_folds_to_qa() {
        let raw = json!({
            "reply": "Продолжим",
            "intent": "consult_request",
            "state": "negotiating"
        })
        .to_string();

        let frame = parse_str(&raw);

        assert_eq!(frame.reply, "Продолжим");
        assert_eq!(frame.state, DialogState::Qa);
    }

    #[test]
    fn malformed_questions_degrade_to_empty() {
        let raw = json!({
            "reply": "Ок",
            "intent": "smalltalk",
            "state": "qa",
            "questions": "не список"
        })
        .to_string();

        let frame = parse_str(&raw);
        assert!(frame.questions.is_empty());
    }

    #[test]
    fn malformed_offer_degrades_to_absent() {
        let raw = json!({
            "reply": "Ок",
            "intent": "price_request",
            "state": "offer",
            "offer": {"package": "platinum"}
        })
        .to_string();

        let frame = parse_str(&raw);

        assert_eq!(frame.reply, "Ок");
        assert!(frame.offer.is_none());
    }

    #[test]
    fn null_offer_is_absent() {
        let raw = json!({
            "reply": "Ок",
            "intent": "smalltalk",
            "state": "idle",
            "offer": null
        })
        .to_string();

        assert!(parse_str(&raw).offer.is_none());
    }

    #[test]
    fn offer_without_price_defaults_to_marker() {
        let raw = json!({
            "reply": "Предлагаю экспресс-формат.",
            "intent": "price_request",
            "state": "offer",
            "offer": {"package": "express", "bullets": []}
        })
        .to_string();

        let frame = parse_str(&raw);
        assert_eq!(frame.offer.unwrap().price, "individual");
    }

    #[test]
    fn malformed_slots_degrade_to_absent() {
        let raw = json!({
            "reply": "Ок",
            "intent": "smalltalk",
            "state": "qa",
            "slots": [1, 2, 3]
        })
        .to_string();

        assert!(parse_str(&raw).slots.is_none());
    }

    #[test]
    fn non_boolean_need_handoff_degrades_to_false() {
        let raw = json!({
            "reply": "Ок",
            "intent": "smalltalk",
            "state": "qa",
            "need_handoff": "да"
        })
        .to_string();

        assert!(!parse_str(&raw).need_handoff);
    }

    #[test]
    fn empty_cta_is_dropped() {
        let raw = json!({
            "reply": "Ок",
            "intent": "smalltalk",
            "state": "idle",
            "cta": ""
        })
        .to_string();

        assert!(parse_str(&raw).cta.is_none());
    }

    #[test]
    fn non_string_cta_is_dropped() {
        let raw = json!({
            "reply": "Ок",
            "intent": "smalltalk",
            "state": "idle",
            "cta": 5
        })
        .to_string();

        assert!(parse_str(&raw).cta.is_none());
    }
}
