mod config_store;
mod file_loader;
mod llm_client;
mod repository_error;
mod session_repository;
mod staging_store;
mod text_splitter;

pub use config_store::{ConfigKey, ConfigStore};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{CompletionRequest, LlmClient, LlmClientError, PromptMessage};
pub use repository_error::RepositoryError;
pub use session_repository::{SessionPage, SessionRepository, SessionSummary};
pub use staging_store::{StagingStore, StagingStoreError};
pub use text_splitter::{TextSplitter, TextSplitterError};
