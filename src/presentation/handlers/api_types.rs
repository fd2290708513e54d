use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::ports::SessionSummary;
use crate::domain::{ConversationSession, Message};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub role_play: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExplainRequest {
    #[serde(default)]
    pub word: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplainResponse {
    pub success: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub session_id: String,
    pub data: UploadData,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadData {
    pub file_name: String,
    pub original_text: String,
    pub result: String,
    pub failed_segments: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NothingExtractedResponse {
    pub success: bool,
    pub file_name: String,
    pub extracted_text: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub sessions: Vec<SessionSummaryDto>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}

impl Pagination {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        Self {
            page,
            limit,
            total,
            pages: total.div_ceil(limit.max(1)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummaryDto {
    pub id: String,
    pub session_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_play: Option<String>,
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SessionSummary> for SessionSummaryDto {
    fn from(summary: SessionSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            session_name: summary.name,
            role_play: summary.role_play,
            message_count: summary.message_count,
            created_at: summary.created_at,
            updated_at: summary.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub session: SessionDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub id: String,
    pub user_id: String,
    pub session_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_play: Option<String>,
    pub messages: Vec<MessageDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ConversationSession> for SessionDto {
    fn from(session: &ConversationSession) -> Self {
        Self {
            id: session.id.to_string(),
            user_id: session.owner_id.to_string(),
            session_name: session.name.clone(),
            role_play: session.role_play.clone(),
            messages: session.messages().iter().map(MessageDto::from).collect(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageDto {
    pub id: String,
    pub role: &'static str,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.as_uuid().to_string(),
            role: message.role.as_str(),
            content: message.content.clone(),
            timestamp: message.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
