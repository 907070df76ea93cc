use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error_response;
use crate::AppState;

/// Score the conversation so far against the instructor-defined criteria.
/// Read-only: recomputed on every call, never cached.
pub async fn evaluate(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.lock().await;
    let config = match session.require_config() {
        Ok(config) => config,
        Err(e) => return error_response(&e),
    };

    let report = anamnese_core::evaluate(&config.criteria, session.history());
    info!(student = %config.student_name, patient = %config.name, "evaluation generated");

    Json(report).into_response()
}
