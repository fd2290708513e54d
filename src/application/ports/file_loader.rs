use std::path::Path;

use async_trait::async_trait;

use crate::domain::Document;

#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_text(&self, path: &Path, document: &Document)
    -> Result<String, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
    #[error("extraction timed out after {0:?}")]
    TimedOut(std::time::Duration),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
