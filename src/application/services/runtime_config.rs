use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::RwLock;

use crate::application::ports::{ConfigKey, ConfigStore, RepositoryError};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful English learning assistant. Correct user's grammar, explain vocabulary, and help them practice English. Do not solve math, physics, or chemistry problems. If asked about these, politely refuse in English stating that you are an English learning assistant.";

/// Keywords seeded into the store when it has none.
pub const DEFAULT_BLOCKED_KEYWORDS: &[&str] = &[
    "giải toán",
    "vật lý",
    "hóa học",
    "code python",
    "viết code",
    "làm bài tập toán",
];

/// Used when the store is unreachable or holds an empty list.
pub const FALLBACK_BLOCKED_KEYWORDS: &[&str] = &[
    "toán",
    "toan",
    "phương trình",
    "phuong trinh",
    "giải toán",
    "equation",
    "calculus",
    "algebra",
    "geometry",
    "vật lý",
    "vat ly",
    "định luật",
    "dinh luat",
    "lực",
    "luc",
    "physics",
    "force",
    "momentum",
    "hóa học",
    "hoa hoc",
    "phản ứng",
    "phan ung",
    "nguyên tố",
    "nguyen to",
    "chemistry",
    "chemical",
    "molecule",
    "code",
    "lập trình",
    "lap trinh",
    "python",
    "javascript",
    "java",
    "programming",
    "function",
    "algorithm",
    "debug",
    "sinh học",
    "sinh hoc",
    "lịch sử",
    "lich su",
    "địa lý",
    "dia ly",
];

/// Snapshot of operator-adjustable settings, passed explicitly into the
/// moderator and the gateway for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub blocked_keywords: Vec<String>,
    /// `None` when the store could not be read; callers use their built-in persona.
    pub system_prompt: Option<String>,
}

impl RuntimeConfig {
    pub fn defaults() -> Self {
        Self {
            blocked_keywords: to_owned(DEFAULT_BLOCKED_KEYWORDS),
            system_prompt: Some(DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }
}

struct CachedSnapshot {
    loaded_at: Instant,
    config: Arc<RuntimeConfig>,
}

/// Process-wide cache in front of the [`ConfigStore`].
///
/// A snapshot is reused until `ttl` elapses or [`RuntimeConfigCache::invalidate`]
/// is called. Snapshots built while the store was failing are never cached.
pub struct RuntimeConfigCache {
    store: Arc<dyn ConfigStore>,
    ttl: Duration,
    cached: RwLock<Option<CachedSnapshot>>,
}

impl RuntimeConfigCache {
    pub fn new(store: Arc<dyn ConfigStore>, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            cached: RwLock::new(None),
        }
    }

    pub async fn snapshot(&self) -> Arc<RuntimeConfig> {
        {
            let cached = self.cached.read().await;
            if let Some(entry) = cached.as_ref() {
                if entry.loaded_at.elapsed() < self.ttl {
                    return Arc::clone(&entry.config);
                }
            }
        }

        let (config, healthy) = self.load().await;
        let config = Arc::new(config);

        let mut cached = self.cached.write().await;
        if healthy {
            *cached = Some(CachedSnapshot {
                loaded_at: Instant::now(),
                config: Arc::clone(&config),
            });
        } else {
            *cached = None;
        }

        config
    }

    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    /// Writes the built-in defaults for keys the store does not hold yet.
    #[tracing::instrument(skip(self))]
    pub async fn seed_defaults(&self) -> Result<(), RepositoryError> {
        let seeded_prompt = self
            .store
            .put_if_absent(
                ConfigKey::SystemPrompt,
                &Value::String(DEFAULT_SYSTEM_PROMPT.to_string()),
                "AI system prompt / persona",
            )
            .await?;

        let keywords = Value::Array(
            DEFAULT_BLOCKED_KEYWORDS
                .iter()
                .map(|k| Value::String(k.to_string()))
                .collect(),
        );
        let seeded_keywords = self
            .store
            .put_if_absent(
                ConfigKey::BlockedKeywords,
                &keywords,
                "List of keywords to block",
            )
            .await?;

        tracing::info!(seeded_prompt, seeded_keywords, "Runtime configuration defaults checked");
        self.invalidate().await;
        Ok(())
    }

    async fn load(&self) -> (RuntimeConfig, bool) {
        let (blocked_keywords, keywords_ok) = self.load_blocked_keywords().await;
        let (system_prompt, prompt_ok) = self.load_system_prompt().await;

        (
            RuntimeConfig {
                blocked_keywords,
                system_prompt,
            },
            keywords_ok && prompt_ok,
        )
    }

    async fn load_blocked_keywords(&self) -> (Vec<String>, bool) {
        match self.store.get(ConfigKey::BlockedKeywords).await {
            Ok(Some(value)) => {
                let keywords = parse_keywords(&value);
                if keywords.is_empty() {
                    tracing::warn!("Stored blocked keyword list is empty or malformed, using fallback list");
                    (to_owned(FALLBACK_BLOCKED_KEYWORDS), true)
                } else {
                    (keywords, true)
                }
            }
            Ok(None) => (to_owned(DEFAULT_BLOCKED_KEYWORDS), true),
            Err(e) => {
                tracing::warn!(error = %e, "Config store unavailable, using fallback blocked keywords");
                (to_owned(FALLBACK_BLOCKED_KEYWORDS), false)
            }
        }
    }

    async fn load_system_prompt(&self) -> (Option<String>, bool) {
        match self.store.get(ConfigKey::SystemPrompt).await {
            Ok(Some(Value::String(prompt))) if !prompt.trim().is_empty() => (Some(prompt), true),
            Ok(Some(_)) | Ok(None) => (Some(DEFAULT_SYSTEM_PROMPT.to_string()), true),
            Err(e) => {
                tracing::warn!(error = %e, "Config store unavailable, using built-in persona");
                (None, false)
            }
        }
    }
}

fn parse_keywords(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn to_owned(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_string()).collect()
}
