//! Criteria coverage scorer: decides, per instructor-defined criterion,
//! whether any student utterance in the conversation addressed it.
//!
//! Purely a read-side computation over the history — recomputed on demand,
//! never cached, and never mutating session state.

use serde::Serialize;

use crate::text::{criterion_keywords, normalize};
use crate::types::{ChatTurn, TurnRole};

/// Fraction of criterion keywords that must appear in a single utterance for
/// majority coverage. Tuned in the field; do not re-derive.
pub const MAJORITY_KEYWORD_THRESHOLD: f64 = 0.7;

/// Outcome of an end-of-session evaluation. Derived, not stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EvaluationReport {
    /// The instructor defined no criteria; there is nothing to score.
    NotApplicable { student_turns: usize },
    Scored {
        /// Formatted as "covered/total".
        score: String,
        covered: Vec<String>,
        omitted: Vec<String>,
        student_turns: usize,
    },
}

/// Score the full history against the configured criteria. Both partitions
/// preserve the instructor's original criterion order.
pub fn evaluate(criteria: &[String], history: &[ChatTurn]) -> EvaluationReport {
    let utterances: Vec<String> = history
        .iter()
        .filter(|turn| turn.role == TurnRole::User)
        .map(|turn| normalize(&turn.content))
        .collect();

    if criteria.is_empty() {
        return EvaluationReport::NotApplicable {
            student_turns: utterances.len(),
        };
    }

    let mut covered = Vec::new();
    let mut omitted = Vec::new();
    for criterion in criteria {
        if criterion_covered(criterion, &utterances) {
            covered.push(criterion.clone());
        } else {
            omitted.push(criterion.clone());
        }
    }

    EvaluationReport::Scored {
        score: format!("{}/{}", covered.len(), criteria.len()),
        covered,
        omitted,
        student_turns: utterances.len(),
    }
}

fn criterion_covered(criterion: &str, normalized_utterances: &[String]) -> bool {
    let criterion_norm = normalize(criterion);
    let keywords = criterion_keywords(&criterion_norm);

    normalized_utterances
        .iter()
        .any(|utterance| utterance_covers(utterance, &criterion_norm, &keywords))
}

/// Coverage rules, short-circuiting in order: exact substring, full keyword
/// coverage, majority keyword coverage (multi-keyword criteria only).
/// An empty keyword set can only be satisfied by the substring rule.
fn utterance_covers(utterance: &str, criterion_norm: &str, keywords: &[String]) -> bool {
    if utterance.contains(criterion_norm) {
        return true;
    }
    if keywords.is_empty() {
        return false;
    }

    let found = keywords
        .iter()
        .filter(|keyword| utterance.contains(keyword.as_str()))
        .count();
    if found == keywords.len() {
        return true;
    }

    keywords.len() > 1 && (found as f64 / keywords.len() as f64) >= MAJORITY_KEYWORD_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(student_messages: &[&str]) -> Vec<ChatTurn> {
        let mut turns = Vec::new();
        for message in student_messages {
            turns.push(ChatTurn::user(*message));
            turns.push(ChatTurn::assistant("Hum, entendi."));
        }
        turns
    }

    fn criteria(items: &[&str]) -> Vec<String> {
        items.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn exact_substring_covers_across_case_and_accents() {
        let report = evaluate(
            &criteria(&["dor no peito"]),
            &history(&["O senhor sente Dor no Péito quando caminha?"]),
        );
        assert_eq!(
            report,
            EvaluationReport::Scored {
                score: "1/1".to_string(),
                covered: vec!["dor no peito".to_string()],
                omitted: vec![],
                student_turns: 1,
            }
        );
    }

    #[test]
    fn full_keyword_coverage_ignores_word_order() {
        // No exact phrase, but both keywords ("perguntar", "alergias") present.
        let report = evaluate(
            &criteria(&["perguntar sobre alergias"]),
            &history(&["vou perguntar uma coisa: tem alergias conhecidas?"]),
        );
        assert!(matches!(report, EvaluationReport::Scored { ref score, .. } if score == "1/1"));
    }

    #[test]
    fn two_of_three_keywords_is_below_threshold() {
        // Keywords {investigar, febre, vespertina}: 2/3 ≈ 0.667 < 0.7 — must not count.
        let report = evaluate(
            &criteria(&["investigar febre vespertina"]),
            &history(&["o senhor tem febre vespertina?"]),
        );
        assert!(matches!(report, EvaluationReport::Scored { ref score, .. } if score == "0/1"));
    }

    #[test]
    fn three_of_four_keywords_meets_threshold() {
        // Keywords {investigar, febre, vespertina, persistente}: 3/4 = 0.75 >= 0.7.
        let report = evaluate(
            &criteria(&["investigar febre vespertina persistente"]),
            &history(&["apresenta febre vespertina persistente?"]),
        );
        assert!(matches!(report, EvaluationReport::Scored { ref score, .. } if score == "1/1"));
    }

    #[test]
    fn stopword_only_criterion_needs_exact_substring() {
        let criteria = criteria(&["o que foi"]);
        let report = evaluate(&criteria, &history(&["contem que e como quando onde"]));
        assert!(matches!(report, EvaluationReport::Scored { ref score, .. } if score == "0/1"));

        let report = evaluate(&criteria, &history(&["me diga o que foi acontecendo"]));
        assert!(matches!(report, EvaluationReport::Scored { ref score, .. } if score == "1/1"));
    }

    #[test]
    fn partitions_preserve_instructor_order() {
        let report = evaluate(
            &criteria(&["perguntar sobre alergias", "dor no peito", "perguntar medicamentos"]),
            &history(&["sente dor no peito?", "usa medicamentos? vou perguntar depois de novo"]),
        );
        match report {
            EvaluationReport::Scored {
                covered, omitted, ..
            } => {
                assert_eq!(covered, vec!["dor no peito", "perguntar medicamentos"]);
                assert_eq!(omitted, vec!["perguntar sobre alergias"]);
            }
            other => panic!("expected scored report, got {other:?}"),
        }
    }

    #[test]
    fn no_criteria_yields_not_applicable_with_turn_count() {
        let report = evaluate(&[], &history(&["bom dia", "onde dói?"]));
        assert_eq!(report, EvaluationReport::NotApplicable { student_turns: 2 });
    }

    #[test]
    fn unrelated_messages_leave_criterion_omitted() {
        let report = evaluate(
            &criteria(&["perguntar idade de início dos sintomas"]),
            &history(&["bom dia", "o tempo está bonito hoje"]),
        );
        assert!(matches!(report, EvaluationReport::Scored { ref score, .. } if score == "0/1"));
    }

    #[test]
    fn symptom_onset_scenario_full_keyword_match() {
        // "perguntar idade de início dos sintomas" → keywords
        // {perguntar, idade, inicio, sintomas}, all present out of order.
        let report = evaluate(
            &criteria(&["perguntar idade de início dos sintomas"]),
            &history(&["vou perguntar: com que idade começou o início dos sintomas?"]),
        );
        assert!(matches!(report, EvaluationReport::Scored { ref score, .. } if score == "1/1"));
    }

    #[test]
    fn assistant_turns_are_never_scanned() {
        let mut turns = history(&["bom dia"]);
        turns.push(ChatTurn::assistant("minha dor no peito aperta"));
        let report = evaluate(&criteria(&["dor no peito"]), &turns);
        assert!(matches!(report, EvaluationReport::Scored { ref score, .. } if score == "0/1"));
    }
}
