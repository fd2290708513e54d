use axum::Json;
use axum::extract::{Path, Query, State};

use crate::domain::SessionId;
use crate::presentation::state::AppState;

use super::api_types::{HistoryQuery, HistoryResponse, Pagination, SessionDto, SessionResponse};
use super::{ApiError, OwnerIdentity};

const DEFAULT_PAGE_SIZE: usize = 10;
const MAX_PAGE_SIZE: usize = 100;

#[tracing::instrument(skip(state, query), fields(owner_id = %owner_id))]
pub async fn history_handler(
    State(state): State<AppState>,
    OwnerIdentity(owner_id): OwnerIdentity,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    let listing = state
        .sessions
        .list(owner_id, page, limit)
        .await
        .map_err(|e| ApiError::from_session(e, "Could not load chat history"))?;

    Ok(Json(HistoryResponse {
        success: true,
        pagination: Pagination::new(page, limit, listing.total),
        sessions: listing.items.into_iter().map(Into::into).collect(),
    }))
}

#[tracing::instrument(skip(state), fields(owner_id = %owner_id))]
pub async fn session_handler(
    State(state): State<AppState>,
    OwnerIdentity(owner_id): OwnerIdentity,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id: SessionId = id
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid session id"))?;

    let session = state
        .sessions
        .get_owned(session_id, owner_id)
        .await
        .map_err(|e| ApiError::from_session(e, "Could not load chat session"))?;

    Ok(Json(SessionResponse {
        success: true,
        session: SessionDto::from(&session),
    }))
}
