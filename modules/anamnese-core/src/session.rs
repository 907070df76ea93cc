//! Session state: the active patient configuration plus the ordered message
//! history. One session exists at a time; the API layer owns it behind a
//! mutex and every operation here is a synchronous state transition.

use crate::error::SimulationError;
use crate::types::{ChatTurn, PatientConfig, PatientConfigInput, RedactedConfig, TurnRole};

#[derive(Debug, Default)]
pub struct Session {
    config: Option<PatientConfig>,
    history: Vec<ChatTurn>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and install a new configuration. All-or-nothing: an invalid
    /// input leaves the previous configuration and history untouched.
    /// Accepting a new configuration clears the history as a side effect.
    pub fn configure(&mut self, input: PatientConfigInput) -> Result<(), SimulationError> {
        let config = input.validate()?;
        self.config = Some(config);
        self.history.clear();
        Ok(())
    }

    pub fn config(&self) -> Option<&PatientConfig> {
        self.config.as_ref()
    }

    /// The active configuration, or a state error when none exists.
    pub fn require_config(&self) -> Result<&PatientConfig, SimulationError> {
        self.config
            .as_ref()
            .ok_or(SimulationError::NoActiveSimulation)
    }

    /// Student-facing view: diagnosis, comorbidities, exam contents and
    /// criteria withheld.
    pub fn redacted_config(&self) -> Option<RedactedConfig> {
        self.config.as_ref().map(RedactedConfig::from)
    }

    /// Clear the history only; the configuration stays in place.
    pub fn reset_history(&mut self) -> Result<(), SimulationError> {
        self.require_config()?;
        self.history.clear();
        Ok(())
    }

    /// Append-only; turns are never removed or reordered.
    pub fn append_turn(&mut self, role: TurnRole, content: impl Into<String>) {
        self.history.push(ChatTurn {
            role,
            content: content.into(),
        });
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Honorific;

    fn input() -> PatientConfigInput {
        PatientConfigInput {
            name: "Dona Maria".to_string(),
            age: Some(71),
            diagnosis: "pneumonia".to_string(),
            initial_complaint: "Tô com falta de ar.".to_string(),
            student_name: "Carlos".to_string(),
            honorific: Some(Honorific::Dr),
            ..Default::default()
        }
    }

    #[test]
    fn configure_replaces_config_and_clears_history() {
        let mut session = Session::new();
        session.configure(input()).expect("first configure");
        session.append_turn(TurnRole::User, "bom dia");
        session.append_turn(TurnRole::Assistant, "Bom dia, Dr. Carlos.");

        session.configure(input()).expect("reconfigure");
        assert!(session.history().is_empty());
        assert!(session.config().is_some());
    }

    #[test]
    fn invalid_configure_leaves_previous_state_untouched() {
        let mut session = Session::new();
        session.configure(input()).expect("configure");
        session.append_turn(TurnRole::User, "bom dia");

        let bad = PatientConfigInput {
            name: String::new(),
            ..input()
        };
        assert!(session.configure(bad).is_err());
        assert_eq!(session.history().len(), 1);
        assert_eq!(
            session.config().map(|c| c.name.as_str()),
            Some("Dona Maria")
        );
    }

    #[test]
    fn reset_clears_history_but_keeps_config() {
        let mut session = Session::new();
        session.configure(input()).expect("configure");
        session.append_turn(TurnRole::User, "bom dia");

        session.reset_history().expect("reset");
        assert!(session.history().is_empty());
        assert_eq!(session.config().map(|c| c.age), Some(71));
    }

    #[test]
    fn reset_without_config_is_a_state_error() {
        let mut session = Session::new();
        assert!(matches!(
            session.reset_history(),
            Err(SimulationError::NoActiveSimulation)
        ));
    }

    #[test]
    fn redacted_view_withholds_diagnosis() {
        let mut session = Session::new();
        session.configure(input()).expect("configure");
        let redacted = session.redacted_config().expect("redacted view");
        assert_eq!(redacted.name, "Dona Maria");
        assert_eq!(redacted.initial_complaint.as_deref(), Some("Tô com falta de ar."));
        let json = serde_json::to_value(&redacted).expect("serialize");
        assert!(json.get("diagnosis").is_none());
        assert!(json.get("comorbidities").is_none());
    }

    #[test]
    fn turns_keep_insertion_order() {
        let mut session = Session::new();
        session.configure(input()).expect("configure");
        session.append_turn(TurnRole::User, "primeira");
        session.append_turn(TurnRole::Assistant, "segunda");
        session.append_turn(TurnRole::User, "terceira");
        let contents: Vec<&str> = session.history().iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["primeira", "segunda", "terceira"]);
    }
}
