use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{ConfigKey, ConfigStore, RepositoryError};

#[derive(Default)]
pub struct InMemoryConfigStore {
    values: RwLock<HashMap<ConfigKey, serde_json::Value>>,
    unreachable: AtomicBool,
    reads: AtomicUsize,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, key: ConfigKey, value: serde_json::Value) {
        self.values.write().await.insert(key, value);
    }

    /// Simulates a store outage: every call fails until switched back.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn check_reachable(&self) -> Result<(), RepositoryError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(RepositoryError::ConnectionFailed(
                "config store unreachable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn get(&self, key: ConfigKey) -> Result<Option<serde_json::Value>, RepositoryError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;
        Ok(self.values.read().await.get(&key).cloned())
    }

    async fn put_if_absent(
        &self,
        key: ConfigKey,
        value: &serde_json::Value,
        _description: &str,
    ) -> Result<bool, RepositoryError> {
        self.check_reachable()?;
        let mut values = self.values.write().await;
        if values.contains_key(&key) {
            return Ok(false);
        }
        values.insert(key, value.clone());
        Ok(true)
    }
}
