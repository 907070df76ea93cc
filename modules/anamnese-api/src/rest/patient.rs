use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{info, warn};

use anamnese_core::PatientConfigInput;

use super::error_response;
use crate::AppState;

/// Install a new simulation configuration. All-or-nothing: rejected inputs
/// leave any previous configuration in place. Accepting one clears history.
pub async fn configure(
    State(state): State<Arc<AppState>>,
    Json(input): Json<PatientConfigInput>,
) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    match session.configure(input) {
        Ok(()) => {
            if let Some(config) = session.config() {
                info!(
                    patient = %config.name,
                    student = %format!("{} {}", config.honorific, config.student_name),
                    "simulation configured"
                );
            }
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "message": "Simulation configured.",
                    "patient": session.redacted_config(),
                })),
            )
                .into_response()
        }
        Err(e) => {
            warn!(error = %e, "configuration rejected");
            error_response(&e)
        }
    }
}

/// Student-facing configuration summary; diagnosis, comorbidities, exam
/// contents and criteria are withheld.
pub async fn get_configuration(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.lock().await;
    match session.redacted_config() {
        Some(patient) => Json(serde_json::json!({
            "configured": true,
            "patient": patient,
        })),
        None => Json(serde_json::json!({
            "configured": false,
            "message": "No simulation configured.",
        })),
    }
}

/// Clear the conversation history, keeping the configuration.
pub async fn reset_history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    match session.reset_history() {
        Ok(()) => {
            info!("conversation history reset");
            StatusCode::OK.into_response()
        }
        Err(e) => error_response(&e),
    }
}
