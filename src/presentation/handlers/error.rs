use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::services::{ChatError, SessionError, UploadError};

use super::api_types::ErrorBody;

/// Failure response: `{success: false, message, error}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    error: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn internal(message: impl Into<String>, error: impl ToString) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            error: Some(error.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Maps session failures, using `context` as the message for internal errors.
    pub fn from_session(error: SessionError, context: &str) -> Self {
        match error {
            SessionError::Forbidden(_) => Self::new(StatusCode::FORBIDDEN, "Access denied"),
            SessionError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Chat session not found"),
            SessionError::Repository(e) => Self::internal(context, e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, error = ?self.error, "Request failed");
        } else {
            tracing::debug!(status = %self.status, message = %self.message, "Request rejected");
        }

        (
            self.status,
            Json(ErrorBody {
                success: false,
                message: self.message,
                error: self.error,
            }),
        )
            .into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(error: ChatError) -> Self {
        match error {
            ChatError::EmptyMessage(_) => Self::bad_request("Message must not be empty"),
            ChatError::Gateway(e) => Self::internal(
                "Sorry, the AI service is unavailable right now. Please try again.",
                e,
            ),
            ChatError::Session(e) => Self::from_session(e, "Failed to send message"),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(error: UploadError) -> Self {
        match error {
            UploadError::EmptyFile => Self::bad_request("Uploaded file is empty"),
            UploadError::Session(e) => Self::from_session(e, "File processing failed"),
            UploadError::Message(e) => Self::internal("File processing failed", e),
        }
    }
}
