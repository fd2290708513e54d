use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{RepositoryError, SessionPage, SessionRepository, SessionSummary};
use crate::domain::{ConversationSession, Message, MessageId, OwnerId, SessionId};

pub struct PgSessionRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    role_play: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: Uuid,
    name: String,
    role_play: Option<String>,
    message_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    role: String,
    content: String,
    created_at: DateTime<Utc>,
}

fn query_failed(e: sqlx::Error) -> RepositoryError {
    RepositoryError::QueryFailed(e.to_string())
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_messages(
        tx: &mut Transaction<'_, Postgres>,
        session_id: Uuid,
        first_position: i32,
        messages: &[Message],
    ) -> Result<(), RepositoryError> {
        for (offset, message) in messages.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO chat_messages (id, session_id, position, role, content, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(message.id.as_uuid())
            .bind(session_id)
            .bind(first_position + offset as i32)
            .bind(message.role.as_str())
            .bind(&message.content)
            .bind(message.created_at)
            .execute(&mut **tx)
            .await
            .map_err(query_failed)?;
        }
        Ok(())
    }

    async fn load_messages(&self, session_id: Uuid) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, role, content, created_at
            FROM chat_messages
            WHERE session_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        rows.into_iter()
            .map(|r| {
                let role = r.role.parse().map_err(RepositoryError::CorruptRecord)?;
                Ok(Message {
                    id: MessageId::from_uuid(r.id),
                    role,
                    content: r.content,
                    created_at: r.created_at,
                })
            })
            .collect()
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    #[instrument(skip(self, session), fields(session_id = %session.id))]
    async fn create_session(&self, session: &ConversationSession) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(query_failed)?;

        sqlx::query(
            r#"
            INSERT INTO chat_sessions (id, owner_id, name, role_play, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(session.owner_id.as_uuid())
        .bind(&session.name)
        .bind(&session.role_play)
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(query_failed)?;

        Self::insert_messages(&mut tx, session.id.as_uuid(), 0, session.messages()).await?;

        tx.commit().await.map_err(query_failed)
    }

    #[instrument(skip(self), fields(session_id = %id))]
    async fn get_session(
        &self,
        id: SessionId,
    ) -> Result<Option<ConversationSession>, RepositoryError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, owner_id, name, role_play, created_at, updated_at
            FROM chat_sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        let Some(r) = row else {
            return Ok(None);
        };

        let messages = self.load_messages(r.id).await?;
        Ok(Some(ConversationSession::restore(
            SessionId::from_uuid(r.id),
            OwnerId::from_uuid(r.owner_id),
            r.name,
            r.role_play,
            messages,
            r.created_at,
            r.updated_at,
        )))
    }

    #[instrument(skip(self, messages), fields(session_id = %id, count = messages.len()))]
    async fn append_messages(
        &self,
        id: SessionId,
        messages: &[Message],
    ) -> Result<DateTime<Utc>, RepositoryError> {
        let session_id = id.as_uuid();
        let mut tx = self.pool.begin().await.map_err(query_failed)?;

        let locked: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM chat_sessions WHERE id = $1 FOR UPDATE")
                .bind(session_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(query_failed)?;
        if locked.is_none() {
            return Err(RepositoryError::NotFound(format!("session {id}")));
        }

        let (next_position,): (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM chat_messages WHERE session_id = $1",
        )
        .bind(session_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(query_failed)?;

        Self::insert_messages(&mut tx, session_id, next_position, messages).await?;

        let (updated_at,): (DateTime<Utc>,) = sqlx::query_as(
            r#"
            UPDATE chat_sessions
            SET updated_at = NOW()
            WHERE id = $1
            RETURNING updated_at
            "#,
        )
        .bind(session_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(query_failed)?;

        tx.commit().await.map_err(query_failed)?;
        Ok(updated_at)
    }

    #[instrument(skip(self), fields(owner_id = %owner_id))]
    async fn list_sessions(
        &self,
        owner_id: OwnerId,
        offset: usize,
        limit: usize,
    ) -> Result<SessionPage, RepositoryError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT s.id, s.name, s.role_play, s.created_at, s.updated_at,
                   (SELECT COUNT(*) FROM chat_messages m WHERE m.session_id = s.id) AS message_count
            FROM chat_sessions s
            WHERE s.owner_id = $1
            ORDER BY s.updated_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner_id.as_uuid())
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM chat_sessions WHERE owner_id = $1")
                .bind(owner_id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(query_failed)?;

        Ok(SessionPage {
            items: rows
                .into_iter()
                .map(|r| SessionSummary {
                    id: SessionId::from_uuid(r.id),
                    name: r.name,
                    role_play: r.role_play,
                    message_count: r.message_count as usize,
                    created_at: r.created_at,
                    updated_at: r.updated_at,
                })
                .collect(),
            total: total as usize,
        })
    }
}
