mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ChunkingSettings, DatabaseSettings, LlmSettings, LoggingSettings, RuntimeConfigSettings,
    ServerSettings, Settings, UploadSettings,
};
