use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

// --- Student identity ---

/// How the simulated patient addresses the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Honorific {
    #[serde(rename = "Dr.")]
    Dr,
    #[serde(rename = "Dra.")]
    Dra,
}

impl std::fmt::Display for Honorific {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Honorific::Dr => write!(f, "Dr."),
            Honorific::Dra => write!(f, "Dra."),
        }
    }
}

// --- Exams ---

/// Exam result content: literal text or an image reference, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExamContent {
    Text { result: String },
    Image { image_url: String, description: String },
}

/// One instructor-configured exam. Immutable once part of a configuration;
/// looked up by normalized-name containment, never by index. Also serves as
/// the exam payload attached to an interact response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamDefinition {
    pub name: String,
    #[serde(flatten)]
    pub content: ExamContent,
}

// --- Patient configuration ---

/// Raw configuration payload as submitted by the instructor. Validated into
/// a [`PatientConfig`] all-or-nothing; a partial configuration is never stored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PatientConfigInput {
    pub name: String,
    pub age: Option<u32>,
    pub comorbidities: String,
    pub diagnosis: String,
    pub initial_complaint: String,
    pub exams: Vec<ExamDefinition>,
    pub criteria: Vec<String>,
    pub student_name: String,
    pub honorific: Option<Honorific>,
}

impl PatientConfigInput {
    pub fn validate(self) -> Result<PatientConfig, SimulationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(SimulationError::Validation(
                "patient name is required".to_string(),
            ));
        }
        let age = match self.age {
            Some(age) if age > 0 => age,
            _ => {
                return Err(SimulationError::Validation(
                    "patient age must be a positive number".to_string(),
                ))
            }
        };
        let diagnosis = self.diagnosis.trim().to_string();
        if diagnosis.is_empty() {
            return Err(SimulationError::Validation(
                "patient diagnosis is required".to_string(),
            ));
        }
        let student_name = self.student_name.trim().to_string();
        if student_name.is_empty() {
            return Err(SimulationError::Validation(
                "student name is required".to_string(),
            ));
        }
        let honorific = self.honorific.ok_or_else(|| {
            SimulationError::Validation(
                "student honorific must be \"Dr.\" or \"Dra.\"".to_string(),
            )
        })?;

        Ok(PatientConfig {
            name,
            age,
            comorbidities: self.comorbidities.trim().to_string(),
            diagnosis,
            initial_complaint: self.initial_complaint.trim().to_string(),
            exams: self
                .exams
                .into_iter()
                .filter(|e| !e.name.trim().is_empty())
                .collect(),
            criteria: self
                .criteria
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
            student_name,
            honorific,
        })
    }
}

/// A fully validated simulation configuration. Replaces any prior value
/// wholesale; lives for the session.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientConfig {
    pub name: String,
    pub age: u32,
    pub comorbidities: String,
    /// Underlying condition — never disclosed verbatim to the student.
    pub diagnosis: String,
    pub initial_complaint: String,
    pub exams: Vec<ExamDefinition>,
    pub criteria: Vec<String>,
    pub student_name: String,
    pub honorific: Honorific,
}

/// What the student-facing UI is allowed to see of the configuration.
/// Diagnosis, comorbidities, exam contents and criteria are withheld.
#[derive(Debug, Clone, Serialize)]
pub struct RedactedConfig {
    pub name: String,
    pub age: u32,
    pub initial_complaint: Option<String>,
    pub student_name: String,
    pub honorific: Honorific,
}

impl From<&PatientConfig> for RedactedConfig {
    fn from(config: &PatientConfig) -> Self {
        Self {
            name: config.name.clone(),
            age: config.age,
            initial_complaint: (!config.initial_complaint.is_empty())
                .then(|| config.initial_complaint.clone()),
            student_name: config.student_name.clone(),
            honorific: config.honorific,
        }
    }
}

// --- Conversation ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

// --- Replies ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Text,
    ExamResult,
}
