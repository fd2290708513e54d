use chrono::{DateTime, Utc};

use super::{MessageId, MessageRole};

/// One turn of a conversation session.
///
/// Content is required and never empty; the timestamp is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("message content must not be empty")]
pub struct EmptyMessageError;

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Result<Self, EmptyMessageError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(EmptyMessageError);
        }

        Ok(Self {
            id: MessageId::new(),
            role,
            content,
            created_at: Utc::now(),
        })
    }

    pub fn user(content: impl Into<String>) -> Result<Self, EmptyMessageError> {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Result<Self, EmptyMessageError> {
        Self::new(MessageRole::Assistant, content)
    }
}
