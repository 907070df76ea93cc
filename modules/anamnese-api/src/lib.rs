//! HTTP surface for the simulated-patient interview. Routing and state only;
//! the conversation engine lives in `anamnese-core` and the oracles in
//! `ai-client`.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use ai_client::{ChatOracle, SpeechOracle};
use anamnese_core::Session;

pub mod rest;

/// Process-wide state. The single session lives behind a mutex that is held
/// across the whole interact read-modify-write, oracle call included, so
/// concurrent requests against the session serialize instead of racing.
pub struct AppState {
    pub session: Mutex<Session>,
    pub chat: Arc<dyn ChatOracle>,
    pub speech: Arc<dyn SpeechOracle>,
    pub tts_voice: String,
    /// Where uploaded exam images are stored (served at /uploads/exams).
    pub exams_dir: PathBuf,
    /// Where synthesized patient audio is stored (served at /uploads/audio).
    pub audio_dir: PathBuf,
}
