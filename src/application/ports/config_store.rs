use std::fmt;

use async_trait::async_trait;

use super::RepositoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    SystemPrompt,
    BlockedKeywords,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::SystemPrompt => "system_prompt",
            ConfigKey::BlockedKeywords => "blocked_keywords",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key/value store holding operator-adjustable AI settings.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get(&self, key: ConfigKey) -> Result<Option<serde_json::Value>, RepositoryError>;

    /// Stores `value` only when `key` has no entry yet. Returns whether it was written.
    async fn put_if_absent(
        &self,
        key: ConfigKey,
        value: &serde_json::Value,
        description: &str,
    ) -> Result<bool, RepositoryError>;
}
