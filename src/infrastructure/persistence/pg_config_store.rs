use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::application::ports::{ConfigKey, ConfigStore, RepositoryError};

/// `ai_config` table: one JSONB value per key.
pub struct PgConfigStore {
    pool: PgPool,
}

impl PgConfigStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfigStore for PgConfigStore {
    #[instrument(skip(self), fields(key = %key))]
    async fn get(&self, key: ConfigKey) -> Result<Option<serde_json::Value>, RepositoryError> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT value FROM ai_config WHERE key = $1")
                .bind(key.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(row.map(|(value,)| value))
    }

    #[instrument(skip(self, value, description), fields(key = %key))]
    async fn put_if_absent(
        &self,
        key: ConfigKey,
        value: &serde_json::Value,
        description: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO ai_config (key, value, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (key) DO NOTHING
            "#,
        )
        .bind(key.as_str())
        .bind(value)
        .bind(description)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}
