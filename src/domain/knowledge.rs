//! Static domain knowledge shared by all conversations.
//!
//! One immutable bundle built at startup: the system instructions for
//! the model, the package catalog, the qualification question bank and
//! the fixed texts used for greetings and fallbacks. Every chat reads
//! the same bundle; nothing here changes at runtime.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::domain::frame::{PackageKind, PRICE_MARKER};

/// Jurisdiction assumed when the user names none.
pub const DEFAULT_JURISDICTION: &str = "KZ";

static STANDARD: Lazy<DomainKnowledge> =
    Lazy::new(|| DomainKnowledge::with_jurisdiction(DEFAULT_JURISDICTION));

/// One entry of the service catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    /// Package tier this entry describes.
    pub kind: PackageKind,
    /// Human-readable package name.
    pub title: String,
    /// Selling points quoted in offers.
    pub bullets: Vec<String>,
    /// Always the fixed marker; prices are quoted individually.
    pub price: String,
}

/// Immutable bundle of everything the bot knows about the practice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainKnowledge {
    /// System instructions sent with every generation call, including
    /// the reply format contract.
    pub system_prompt: String,
    /// Fixed greeting for the start command.
    pub greeting: String,
    /// Reply used when provider output fails frame validation.
    pub fallback_reply: String,
    /// Reply used when the provider itself is unreachable.
    pub degraded_reply: String,
    /// Service catalog, one entry per package tier.
    pub packages: Vec<PackageInfo>,
    /// Qualification question bank, most important first.
    pub questions: Vec<String>,
    /// Call-to-action appended when the model supplies none better.
    pub default_cta: String,
    /// Slot names the model is asked to fill, most important first.
    pub slot_samples: Vec<String>,
    /// Jurisdiction assumed when the user names none.
    pub jurisdiction: String,
}

impl DomainKnowledge {
    /// Returns the standard bundle for the default jurisdiction.
    pub fn standard() -> Self {
        STANDARD.clone()
    }

    /// Builds the bundle for a specific default jurisdiction.
    pub fn with_jurisdiction(jurisdiction: impl Into<String>) -> Self {
        let jurisdiction = jurisdiction.into();

        let system_prompt = format!(
            "Ты — вежливый юридический ассистент-пресейл. Отвечай кратко, по делу, \
             без финальных юрзаключений. Веди к офферу или брони консультации. \
             Юрисдикция по умолчанию: {jurisdiction}. \
             Отвечай строго одним JSON-объектом без пояснений и без разметки, в формате: \
             {{\"reply\": string, \
             \"intent\": \"consult_request\" | \"price_request\" | \"booking_request\" | \"smalltalk\" | \"unknown\", \
             \"state\": \"idle\" | \"qa\" | \"offer\" | \"booking\" | \"handoff\", \
             \"need_handoff\": boolean, \
             \"questions\": [string], \
             \"offer\": {{\"package\": \"express\" | \"review\" | \"turnkey\", \"bullets\": [string], \"price\": \"{PRICE_MARKER}\"}} или null, \
             \"slots\": [string] или null, \
             \"cta\": string или null}}."
        );

        let greeting = format!(
            "Здравствуйте! ЮрКонсалт AI на связи. Кратко опишите ваш вопрос \
             и укажите юрисдикцию (например, {jurisdiction})."
        );

        Self {
            system_prompt,
            greeting,
            fallback_reply: "Извините, не понял запрос. Уточните, пожалуйста, детали \
                             — и я подскажу подходящий формат консультации."
                .to_string(),
            degraded_reply: "Произошла ошибка при генерации ответа. Пожалуйста, повторите \
                             запрос и укажите контрагента, сумму и сроки — так я смогу \
                             помочь быстрее."
                .to_string(),
            packages: vec![
                PackageInfo {
                    kind: PackageKind::Express,
                    title: "Экспресс-консультация".to_string(),
                    bullets: vec![
                        "Устная консультация 30–40 минут".to_string(),
                        "Разбор ситуации и оценка рисков".to_string(),
                        "План действий по шагам".to_string(),
                    ],
                    price: PRICE_MARKER.to_string(),
                },
                PackageInfo {
                    kind: PackageKind::Review,
                    title: "Проверка документов".to_string(),
                    bullets: vec![
                        "Анализ договора и сопутствующих документов".to_string(),
                        "Письменное заключение с перечнем рисков".to_string(),
                        "Правки и формулировки под вашу задачу".to_string(),
                    ],
                    price: PRICE_MARKER.to_string(),
                },
                PackageInfo {
                    kind: PackageKind::Turnkey,
                    title: "Сопровождение под ключ".to_string(),
                    bullets: vec![
                        "Полное сопровождение сделки".to_string(),
                        "Переговоры и переписка с контрагентом".to_string(),
                        "Подготовка всех документов".to_string(),
                    ],
                    price: PRICE_MARKER.to_string(),
                },
            ],
            questions: vec![
                format!("В какой юрисдикции вопрос (например, {jurisdiction})?"),
                "Кто контрагент и какова его роль?".to_string(),
                "Какая сумма сделки или спора?".to_string(),
                "Какие сроки для вас критичны?".to_string(),
            ],
            default_cta: "Забронировать консультацию: напишите «бронь», и мы подберём время."
                .to_string(),
            slot_samples: vec![
                "юрисдикция".to_string(),
                "контрагент".to_string(),
                "сумма".to_string(),
                "сроки".to_string(),
            ],
            jurisdiction,
        }
    }
}

impl Default for DomainKnowledge {
    fn default() -> Self {
        Self::standard()
    }
}
