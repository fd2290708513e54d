use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::application::ports::{RepositoryError, SessionPage, SessionRepository};
use crate::domain::{ConversationSession, Message, OwnerId, SessionId, SessionNaming};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("session {0} belongs to another user")]
    Forbidden(SessionId),
    #[error("session {0} not found")]
    NotFound(SessionId),
}

/// Session lookup and creation plus serialized appends.
///
/// Appends to the same session are serialized through a per-session lock so
/// concurrent pipelines never interleave their turns. Locks are dropped from
/// the table once nobody holds them.
pub struct SessionStore {
    repository: Arc<dyn SessionRepository>,
    append_locks: Mutex<HashMap<SessionId, Arc<tokio::sync::Mutex<()>>>>,
}

impl SessionStore {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            repository,
            append_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Loads the caller's session, or creates a fresh one when no id is given
    /// or the id is unknown.
    #[tracing::instrument(skip(self, naming), fields(session_id = ?session_id, owner_id = %owner_id))]
    pub async fn get_or_create(
        &self,
        session_id: Option<SessionId>,
        owner_id: OwnerId,
        naming: &SessionNaming,
    ) -> Result<ConversationSession, SessionError> {
        if let Some(id) = session_id {
            match self.repository.get_session(id).await? {
                Some(session) if session.is_owned_by(owner_id) => return Ok(session),
                Some(_) => {
                    tracing::warn!(session_id = %id, "Rejected access to foreign session");
                    return Err(SessionError::Forbidden(id));
                }
                None => {
                    tracing::debug!(session_id = %id, "Unknown session id, starting a new session");
                }
            }
        }

        let session = ConversationSession::new(owner_id, naming);
        self.repository.create_session(&session).await?;
        tracing::info!(session_id = %session.id, name = %session.name, "Session created");
        Ok(session)
    }

    pub async fn get(&self, id: SessionId) -> Result<Option<ConversationSession>, SessionError> {
        Ok(self.repository.get_session(id).await?)
    }

    /// Loads a session and checks that the caller owns it.
    pub async fn get_owned(
        &self,
        id: SessionId,
        owner_id: OwnerId,
    ) -> Result<ConversationSession, SessionError> {
        let session = self
            .repository
            .get_session(id)
            .await?
            .ok_or(SessionError::NotFound(id))?;

        if !session.is_owned_by(owner_id) {
            return Err(SessionError::Forbidden(id));
        }

        Ok(session)
    }

    /// Persists `messages` as one unit, then mirrors them onto `session`.
    /// On failure the in-memory session is left untouched.
    #[tracing::instrument(skip(self, session, messages), fields(session_id = %session.id, count = messages.len()))]
    pub async fn append(
        &self,
        session: &mut ConversationSession,
        messages: Vec<Message>,
    ) -> Result<(), SessionError> {
        let lock = self.lock_for(session.id);
        let result = {
            let _guard = lock.lock().await;
            self.repository.append_messages(session.id, &messages).await
        };
        drop(lock);
        self.prune_locks();

        let updated_at = result?;
        for message in messages {
            session.append(message);
        }
        session.updated_at = session.updated_at.max(updated_at);
        Ok(())
    }

    pub async fn append_turns(
        &self,
        session: &mut ConversationSession,
        user: Message,
        assistant: Message,
    ) -> Result<(), SessionError> {
        self.append(session, vec![user, assistant]).await
    }

    /// One page of the owner's sessions, newest first. Pages start at 1.
    pub async fn list(
        &self,
        owner_id: OwnerId,
        page: usize,
        limit: usize,
    ) -> Result<SessionPage, SessionError> {
        let offset = page.saturating_sub(1).saturating_mul(limit);
        Ok(self
            .repository
            .list_sessions(owner_id, offset, limit)
            .await?)
    }

    fn lock_for(&self, id: SessionId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .append_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(id).or_default().clone()
    }

    fn prune_locks(&self) {
        let mut locks = self
            .append_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.append_locks
            .lock()
            .map(|locks| locks.len())
            .unwrap_or_default()
    }
}
