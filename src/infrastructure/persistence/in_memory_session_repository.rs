use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::application::ports::{RepositoryError, SessionPage, SessionRepository, SessionSummary};
use crate::domain::{ConversationSession, Message, OwnerId, SessionId};

/// Process-local session storage, used when no database is configured and in tests.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, ConversationSession>>,
    fail_appends: AtomicBool,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent append fail, leaving stored sessions untouched.
    pub fn fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create_session(&self, session: &ConversationSession) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(RepositoryError::QueryFailed(format!(
                "session {} already exists",
                session.id
            )));
        }
        sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn get_session(
        &self,
        id: SessionId,
    ) -> Result<Option<ConversationSession>, RepositoryError> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn append_messages(
        &self,
        id: SessionId,
        messages: &[Message],
    ) -> Result<DateTime<Utc>, RepositoryError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(RepositoryError::QueryFailed(
                "append rejected by test switch".to_string(),
            ));
        }

        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("session {id}")))?;

        for message in messages {
            session.append(message.clone());
        }
        session.updated_at = Utc::now().max(session.updated_at);
        Ok(session.updated_at)
    }

    async fn list_sessions(
        &self,
        owner_id: OwnerId,
        offset: usize,
        limit: usize,
    ) -> Result<SessionPage, RepositoryError> {
        let sessions = self.sessions.read().await;
        let mut owned: Vec<&ConversationSession> = sessions
            .values()
            .filter(|s| s.is_owned_by(owner_id))
            .collect();
        owned.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(SessionPage {
            total: owned.len(),
            items: owned
                .into_iter()
                .skip(offset)
                .take(limit)
                .map(SessionSummary::from)
                .collect(),
        })
    }
}
