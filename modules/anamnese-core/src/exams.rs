//! Exam request matcher: detects whether the student's message names one of
//! the configured exams, so the reply path can short-circuit to a scripted
//! confirmation instead of trusting free-form generation with exam disclosure.

use crate::text::normalize_for_exam;
use crate::types::{ExamDefinition, Honorific};

/// First configured exam whose non-empty normalized name is contained in the
/// normalized student message. First-match-wins by configuration order, not
/// longest match.
pub fn match_exam<'a>(
    exams: &'a [ExamDefinition],
    student_message: &str,
) -> Option<&'a ExamDefinition> {
    let message = normalize_for_exam(student_message);
    exams.iter().find(|exam| {
        let name = normalize_for_exam(&exam.name);
        let name = name.trim();
        !name.is_empty() && message.contains(name)
    })
}

/// The fixed spoken confirmation used when an exam request is recognized and
/// the guardrail did not already override the reply.
pub fn confirmation_sentence(honorific: Honorific, exam_name: &str) -> String {
    format!(
        "Sim, {honorific}, o resultado do {exam_name} está disponível para o(a) senhor(a) visualizar."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExamContent;

    fn exam(name: &str) -> ExamDefinition {
        ExamDefinition {
            name: name.to_string(),
            content: ExamContent::Text {
                result: "resultado".to_string(),
            },
        }
    }

    #[test]
    fn matches_by_normalized_containment() {
        let exams = vec![exam("Eletrocardiograma")];
        let found = match_exam(&exams, "Gostaria de ver o ELETROCARDIOGRAMA, por favor!");
        assert_eq!(found.map(|e| e.name.as_str()), Some("Eletrocardiograma"));
    }

    #[test]
    fn matches_ignoring_accents_and_punctuation() {
        let exams = vec![exam("Raio-X de Tórax (PA)")];
        let found = match_exam(&exams, "pode me mostrar o raio-x de torax (pa)?");
        assert!(found.is_some());
    }

    #[test]
    fn first_configured_exam_wins() {
        // Both names are substrings of the message; configuration order decides.
        let exams = vec![exam("Hemograma"), exam("Hemograma completo")];
        let found = match_exam(&exams, "quero o hemograma completo");
        assert_eq!(found.map(|e| e.name.as_str()), Some("Hemograma"));
    }

    #[test]
    fn no_match_for_unconfigured_exam() {
        let exams = vec![exam("Eletrocardiograma")];
        assert!(match_exam(&exams, "cadê a tomografia?").is_none());
    }

    #[test]
    fn blank_normalized_name_never_matches() {
        let exams = vec![exam("???")];
        assert!(match_exam(&exams, "qualquer coisa").is_none());
    }

    #[test]
    fn confirmation_names_the_exam_and_honorific() {
        let sentence = confirmation_sentence(Honorific::Dra, "Eletrocardiograma");
        assert!(sentence.starts_with("Sim, Dra.,"));
        assert!(sentence.contains("Eletrocardiograma"));
    }
}
