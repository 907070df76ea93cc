use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use anamnese_core::SimulationError;

use super::error_response;
use crate::AppState;

#[derive(Deserialize)]
pub struct SpeechRequest {
    text: String,
    voice: Option<String>,
}

/// Synthesize the patient's reply as audio, store it under the public audio
/// directory and return its URL.
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SpeechRequest>,
) -> impl IntoResponse {
    if body.text.trim().is_empty() {
        return error_response(&SimulationError::Validation(
            "text for speech synthesis is required".to_string(),
        ));
    }
    let voice = body.voice.unwrap_or_else(|| state.tts_voice.clone());

    let audio = match state.speech.synthesize(&body.text, &voice).await {
        Ok(audio) => audio,
        Err(e) => {
            warn!(error = %e, "speech oracle call failed");
            return error_response(&SimulationError::Oracle(e.to_string()));
        }
    };

    let file_name = format!("patient-{}.mp3", Uuid::new_v4());
    if let Err(e) = tokio::fs::write(state.audio_dir.join(&file_name), &audio).await {
        warn!(error = %e, "failed to store synthesized audio");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    Json(serde_json::json!({
        "audio_url": format!("/uploads/audio/{file_name}"),
    }))
    .into_response()
}
