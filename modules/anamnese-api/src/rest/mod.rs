pub mod evaluation;
pub mod interact;
pub mod patient;
pub mod speech;
pub mod upload;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use anamnese_core::SimulationError;

/// Map engine errors onto HTTP responses. Validation and state errors are the
/// caller's fault; oracle failures are ours.
pub(crate) fn error_response(err: &SimulationError) -> Response {
    let status = match err {
        SimulationError::Validation(_) | SimulationError::NoActiveSimulation => {
            StatusCode::BAD_REQUEST
        }
        SimulationError::Oracle(_) | SimulationError::Anyhow(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(serde_json::json!({"error": err.to_string()}))).into_response()
}
