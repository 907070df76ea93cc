use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{info, warn};

use ai_client::{GenerationParams, Message};
use anamnese_core::{finalize_reply, prompt, SimulationError, TurnRole};

use super::error_response;
use crate::AppState;

#[derive(Deserialize)]
pub struct InteractRequest {
    message: String,
}

/// One interview turn: record the student message, ask the chat oracle for a
/// draft reply, pass it through the guardrail and the exam matcher, record
/// and return the final reply.
pub async fn interact(
    State(state): State<Arc<AppState>>,
    Json(body): Json<InteractRequest>,
) -> impl IntoResponse {
    let message = body.message.trim().to_string();
    if message.is_empty() {
        return error_response(&SimulationError::Validation(
            "message must not be empty".to_string(),
        ));
    }

    let mut session = state.session.lock().await;
    let config = match session.require_config() {
        Ok(config) => config.clone(),
        Err(e) => return error_response(&e),
    };

    let mut messages = vec![Message::system(prompt::system_prompt(&config))];
    for turn in session.history() {
        messages.push(match turn.role {
            TurnRole::User => Message::user(turn.content.as_str()),
            TurnRole::Assistant => Message::assistant(turn.content.as_str()),
        });
    }
    messages.push(Message::user(message.as_str()));

    info!(student = %config.student_name, message = %message, "student message");

    // The student turn is recorded before the oracle call and kept on
    // failure: a user turn may exist with no matching assistant turn, and
    // the caller has to tolerate that.
    session.append_turn(TurnRole::User, message.as_str());

    let params = GenerationParams {
        temperature: prompt::REPLY_TEMPERATURE,
        top_p: prompt::REPLY_TOP_P,
        max_tokens: prompt::REPLY_MAX_TOKENS,
    };
    let draft = match state.chat.complete(messages, params).await {
        Ok(draft) => draft,
        Err(e) => {
            warn!(error = %e, "chat oracle call failed");
            return error_response(&SimulationError::Oracle(e.to_string()));
        }
    };

    let reply = finalize_reply(&config, session.history(), &message, &draft);
    session.append_turn(TurnRole::Assistant, reply.text.as_str());

    info!(
        patient = %config.name,
        reply = %ai_client::util::truncate_to_char_boundary(&reply.text, 100),
        "patient reply"
    );

    Json(serde_json::json!({
        "reply": reply.text,
        "kind": reply.kind,
        "exam": reply.exam,
    }))
    .into_response()
}
