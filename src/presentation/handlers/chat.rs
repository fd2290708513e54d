use axum::Json;
use axum::extract::State;

use crate::application::services::{ChatOutcome, ChatRequest};
use crate::domain::SessionId;
use crate::presentation::state::AppState;

use super::api_types::{ExplainRequest, ExplainResponse, SendMessageRequest, SendMessageResponse};
use super::{ApiError, OwnerIdentity};

/// Parses an optional session id; blank means "start a new session".
pub(super) fn parse_session_id(raw: Option<&str>) -> Result<Option<SessionId>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse::<SessionId>()
            .map(Some)
            .map_err(|_| ApiError::bad_request("Invalid session id")),
    }
}

#[tracing::instrument(skip(state, request), fields(owner_id = %owner_id))]
pub async fn send_message_handler(
    State(state): State<AppState>,
    OwnerIdentity(owner_id): OwnerIdentity,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let message = request
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Message must not be empty"))?;
    let session_id = parse_session_id(request.session_id.as_deref())?;

    let outcome = state
        .chat_pipeline
        .send(ChatRequest {
            owner_id,
            message,
            session_id,
            role_play: request.role_play,
        })
        .await?;

    let response = match outcome {
        ChatOutcome::Blocked {
            message,
            suggestion,
        } => SendMessageResponse {
            success: true,
            message,
            session_id: None,
            is_blocked: true,
            suggestion: Some(suggestion),
        },
        ChatOutcome::Replied { session_id, reply } => SendMessageResponse {
            success: true,
            message: reply,
            session_id: Some(session_id.to_string()),
            is_blocked: false,
            suggestion: None,
        },
    };

    Ok(Json(response))
}

#[tracing::instrument(skip(state, request))]
pub async fn explain_handler(
    State(state): State<AppState>,
    OwnerIdentity(_): OwnerIdentity,
    Json(request): Json<ExplainRequest>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let word = request
        .word
        .filter(|w| !w.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Word must not be empty"))?;

    let explanation = state
        .chat_pipeline
        .explain(&word)
        .await
        .map_err(|e| ApiError::internal("Could not explain this word", e))?;

    Ok(Json(ExplainResponse {
        success: true,
        explanation,
    }))
}
