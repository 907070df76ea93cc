//! Character-consistency guardrail.
//!
//! Every draft reply from the generative oracle passes through here before it
//! is shown to the student or stored. A small closed blocklist plus recency
//! heuristics keeps the one hard requirement of the simulation — never
//! breaking character — enforceable deterministically at the boundary.

use tracing::warn;

use crate::text::normalize;
use crate::types::{ChatTurn, PatientConfig, TurnRole};

/// Self-revealing admissions that expose the responder as a machine.
pub const PERSONA_BREAK_PHRASES: &[&str] = &[
    "sou um assistente virtual",
    "sou uma inteligência artificial",
    "sou um modelo de linguagem",
    "não tenho sentimentos",
    "não tenho corpo físico",
    "na verdade sou um programa",
    "como um modelo de ia",
    "minha programação",
    "sou uma ia",
    "fui programado",
];

/// Role-reversing questions a patient would never ask the interviewer.
pub const LEADING_QUESTION_PHRASES: &[&str] = &[
    "como posso ajudá-lo",
    "como posso lhe ser útil",
    "em que posso ser útil",
    "o que deseja saber",
    "posso te ajudar com mais alguma coisa",
];

/// How many trailing turns are scanned when checking whether the initial
/// complaint was already stated. Field-tuned; do not re-derive.
pub const RECENT_ASSISTANT_WINDOW: usize = 4;

/// The complaint is only restated while the conversation is still opening —
/// fewer than this many assistant turns so far.
pub const EARLY_COMPLAINT_TURN_LIMIT: usize = 2;

/// The complaint counts as "already stated" when this many of its leading
/// normalized characters appear in a recent assistant turn.
pub const COMPLAINT_PREFIX_LEN: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    PersonaBreak,
    LeadingQuestion,
}

/// Priority-ordered rule table: first matching rule wins, at most one
/// correction applies per turn.
const RULES: &[(Violation, &[&str])] = &[
    (Violation::PersonaBreak, PERSONA_BREAK_PHRASES),
    (Violation::LeadingQuestion, LEADING_QUESTION_PHRASES),
];

/// Result of reviewing a draft reply: the text to use, and which rule fired
/// (if any). A correction is not an error — it is a logged substitution,
/// invisible to the caller except as the final reply text.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub text: String,
    pub violation: Option<Violation>,
}

/// Inspect a draft reply against the rule table and substitute a corrective
/// reply when a rule fires. Matching is case- and diacritic-insensitive.
pub fn review(
    draft: &str,
    student_message: &str,
    config: &PatientConfig,
    history: &[ChatTurn],
) -> Review {
    let draft_norm = normalize(draft);
    let message_norm = normalize(student_message);

    let violation = RULES.iter().find_map(|(kind, phrases)| {
        phrases
            .iter()
            .any(|phrase| {
                let phrase = normalize(phrase);
                match kind {
                    Violation::PersonaBreak => draft_norm.contains(&phrase),
                    // Echo guard: the oracle merely repeating the student's
                    // own words back is not a violation.
                    Violation::LeadingQuestion => {
                        draft_norm.contains(&phrase) && !message_norm.contains(&phrase)
                    }
                }
            })
            .then_some(*kind)
    });

    match violation {
        None => Review {
            text: draft.to_string(),
            violation: None,
        },
        Some(Violation::PersonaBreak) => {
            warn!(draft, "draft reply broke character; substituting deflection");
            Review {
                text: format!(
                    "Desculpe, {}, pode repetir a pergunta, por favor? Não entendi bem.",
                    config.honorific
                ),
                violation: Some(Violation::PersonaBreak),
            }
        }
        Some(Violation::LeadingQuestion) => {
            warn!(draft, "draft reply asked a leading question; substituting");
            let text = if should_restate_complaint(config, history) {
                config.initial_complaint.clone()
            } else {
                format!("Hum... {}.", config.honorific)
            };
            Review {
                text,
                violation: Some(Violation::LeadingQuestion),
            }
        }
    }
}

/// The initial complaint is the correction of choice early in the interview,
/// as long as it is defined and was not already said in the recent window.
fn should_restate_complaint(config: &PatientConfig, history: &[ChatTurn]) -> bool {
    if config.initial_complaint.is_empty() {
        return false;
    }
    let assistant_turns = history
        .iter()
        .filter(|turn| turn.role == TurnRole::Assistant)
        .count();
    if assistant_turns >= EARLY_COMPLAINT_TURN_LIMIT {
        return false;
    }

    let prefix: String = normalize(&config.initial_complaint)
        .chars()
        .take(COMPLAINT_PREFIX_LEN)
        .collect();
    let recently_stated = history
        .iter()
        .rev()
        .take(RECENT_ASSISTANT_WINDOW)
        .filter(|turn| turn.role == TurnRole::Assistant)
        .any(|turn| normalize(&turn.content).contains(&prefix));

    !recently_stated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Honorific;

    fn config() -> PatientConfig {
        PatientConfig {
            name: "Seu José".to_string(),
            age: 63,
            comorbidities: String::new(),
            diagnosis: "infarto agudo do miocárdio".to_string(),
            initial_complaint: "Estou com uma dor forte no peito.".to_string(),
            exams: vec![],
            criteria: vec![],
            student_name: "Ana".to_string(),
            honorific: Honorific::Dra,
        }
    }

    #[test]
    fn clean_draft_passes_through() {
        let review = review("A dor começou ontem à noite.", "quando começou?", &config(), &[]);
        assert_eq!(review.text, "A dor começou ontem à noite.");
        assert_eq!(review.violation, None);
    }

    #[test]
    fn persona_break_is_replaced_with_deflection() {
        let review = review(
            "Desculpe, mas sou uma inteligência artificial e não sinto dor.",
            "como você está?",
            &config(),
            &[],
        );
        assert_eq!(review.violation, Some(Violation::PersonaBreak));
        assert_eq!(
            review.text,
            "Desculpe, Dra., pode repetir a pergunta, por favor? Não entendi bem."
        );
    }

    #[test]
    fn persona_break_matches_without_accents() {
        let review = review(
            "SOU UMA INTELIGENCIA ARTIFICIAL, na verdade.",
            "oi",
            &config(),
            &[],
        );
        assert_eq!(review.violation, Some(Violation::PersonaBreak));
    }

    #[test]
    fn persona_break_takes_priority_over_leading_question() {
        let review = review(
            "Sou uma IA. O que deseja saber?",
            "bom dia",
            &config(),
            &[],
        );
        assert_eq!(review.violation, Some(Violation::PersonaBreak));
    }

    #[test]
    fn early_leading_question_restates_complaint() {
        let review = review(
            "Olá! O que deseja saber sobre minha saúde?",
            "bom dia",
            &config(),
            &[ChatTurn::user("bom dia")],
        );
        assert_eq!(review.violation, Some(Violation::LeadingQuestion));
        assert_eq!(review.text, "Estou com uma dor forte no peito.");
    }

    #[test]
    fn leading_question_echoed_from_student_is_kept() {
        let review = review(
            "O que deseja saber? Pode perguntar.",
            "se eu fosse o senhor, perguntaria: o que deseja saber?",
            &config(),
            &[],
        );
        assert_eq!(review.violation, None);
    }

    #[test]
    fn leading_question_after_opening_uses_filler() {
        let history = vec![
            ChatTurn::user("bom dia"),
            ChatTurn::assistant("Bom dia, Dra. Ana."),
            ChatTurn::user("como se sente?"),
            ChatTurn::assistant("Estou com uma dor forte no peito."),
        ];
        let review = review("Em que posso ser útil?", "certo", &config(), &history);
        assert_eq!(review.violation, Some(Violation::LeadingQuestion));
        assert_eq!(review.text, "Hum... Dra..");
    }

    #[test]
    fn complaint_not_restated_when_recently_stated() {
        let history = vec![
            ChatTurn::user("bom dia"),
            ChatTurn::assistant("Estou com uma dor forte no peito."),
        ];
        let review = review("O que deseja saber?", "certo", &config(), &history);
        assert_eq!(review.text, "Hum... Dra..");
    }

    #[test]
    fn no_complaint_configured_falls_back_to_filler() {
        let config = PatientConfig {
            initial_complaint: String::new(),
            ..config()
        };
        let review = review("O que deseja saber?", "oi", &config, &[]);
        assert_eq!(review.violation, Some(Violation::LeadingQuestion));
        assert_eq!(review.text, "Hum... Dra..");
    }
}
