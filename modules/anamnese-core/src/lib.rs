//! Core engine for the simulated-patient interview: text normalization,
//! criteria coverage scoring, exam request matching, the character-consistency
//! guardrail and the session state machine. No I/O lives here — the HTTP
//! surface and the generative oracles are separate crates.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod exams;
pub mod guardrail;
pub mod prompt;
pub mod reply;
pub mod session;
pub mod text;
pub mod types;

pub use config::Config;
pub use error::SimulationError;
pub use evaluation::{evaluate, EvaluationReport};
pub use reply::{finalize_reply, PatientReply};
pub use session::Session;
pub use types::*;
