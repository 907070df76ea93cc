//! Turn finalization: composes the guardrail review and the exam request
//! matcher into the reply actually shown to the student.

use serde::Serialize;

use crate::exams;
use crate::guardrail;
use crate::types::{ChatTurn, ExamDefinition, PatientConfig, ReplyKind};

/// The final reply for one interaction turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientReply {
    pub text: String,
    pub kind: ReplyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam: Option<ExamDefinition>,
}

/// Post-process the oracle's draft reply for one student message.
///
/// The guardrail runs first. The exam matcher always attaches the payload of
/// a recognized exam, but the scripted confirmation only replaces the spoken
/// reply when no guardrail correction fired — a correction takes precedence
/// for that turn.
pub fn finalize_reply(
    config: &PatientConfig,
    history: &[ChatTurn],
    student_message: &str,
    draft: &str,
) -> PatientReply {
    let review = guardrail::review(draft, student_message, config, history);

    match exams::match_exam(&config.exams, student_message) {
        Some(exam) => {
            let text = if review.violation.is_none() {
                exams::confirmation_sentence(config.honorific, &exam.name)
            } else {
                review.text
            };
            PatientReply {
                text,
                kind: ReplyKind::ExamResult,
                exam: Some(exam.clone()),
            }
        }
        None => PatientReply {
            text: review.text,
            kind: ReplyKind::Text,
            exam: None,
        },
    }
}
