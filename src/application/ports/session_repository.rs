use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ConversationSession, Message, OwnerId, SessionId};

use super::RepositoryError;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create_session(&self, session: &ConversationSession) -> Result<(), RepositoryError>;

    async fn get_session(
        &self,
        id: SessionId,
    ) -> Result<Option<ConversationSession>, RepositoryError>;

    /// Appends all messages in order and refreshes the session's `updated_at`.
    /// Either every message lands or none does.
    async fn append_messages(
        &self,
        id: SessionId,
        messages: &[Message],
    ) -> Result<DateTime<Utc>, RepositoryError>;

    /// Sessions of one owner, most recently updated first.
    async fn list_sessions(
        &self,
        owner_id: OwnerId,
        offset: usize,
        limit: usize,
    ) -> Result<SessionPage, RepositoryError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub id: SessionId,
    pub name: String,
    pub role_play: Option<String>,
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ConversationSession> for SessionSummary {
    fn from(session: &ConversationSession) -> Self {
        Self {
            id: session.id,
            name: session.name.clone(),
            role_play: session.role_play.clone(),
            message_count: session.messages().len(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionPage {
    pub items: Vec<SessionSummary>,
    pub total: usize,
}
