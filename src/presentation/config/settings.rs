use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub llm: LlmSettings,
    pub chunking: ChunkingSettings,
    pub upload: UploadSettings,
    pub runtime_config: RuntimeConfigSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Postgres connection string. Sessions and runtime configuration are
    /// kept in memory when absent.
    #[serde(default)]
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    pub request_timeout_secs: u64,
    pub chat_temperature: f32,
    pub chat_max_tokens: u32,
    pub task_temperature: f32,
    pub task_max_tokens: u32,
    pub explain_temperature: f32,
    pub explain_max_tokens: u32,
}

impl LlmSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingSettings {
    pub max_chunk_length: usize,
    pub max_chunks: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub directory: PathBuf,
    pub max_file_size_mb: usize,
    pub ocr_languages: String,
    pub ocr_binary: String,
    pub extraction_timeout_secs: u64,
}

impl UploadSettings {
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }

    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfigSettings {
    pub cache_ttl_secs: u64,
}

impl RuntimeConfigSettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Settings {
    /// Layers built-in defaults, `appsettings.{environment}.toml` and
    /// `APP__SECTION__KEY` environment variables, in that order.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.max_connections", 10)?
            .set_default("llm.base_url", "https://api.deepseek.com/v1")?
            .set_default("llm.api_key", "")?
            .set_default("llm.model", "deepseek-chat")?
            .set_default("llm.request_timeout_secs", 60)?
            .set_default("llm.chat_temperature", 0.7)?
            .set_default("llm.chat_max_tokens", 1000)?
            .set_default("llm.task_temperature", 0.3)?
            .set_default("llm.task_max_tokens", 2000)?
            .set_default("llm.explain_temperature", 0.5)?
            .set_default("llm.explain_max_tokens", 800)?
            .set_default("chunking.max_chunk_length", 2000)?
            .set_default("chunking.max_chunks", 200)?
            .set_default("upload.directory", "uploads")?
            .set_default("upload.max_file_size_mb", 10)?
            .set_default("upload.ocr_languages", "eng+vie")?
            .set_default("upload.ocr_binary", "tesseract")?
            .set_default("upload.extraction_timeout_secs", 120)?
            .set_default("runtime_config.cache_ttl_secs", 60)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.file_suffix()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
