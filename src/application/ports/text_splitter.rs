use async_trait::async_trait;

use crate::domain::Chunk;

#[async_trait]
pub trait TextSplitter: Send + Sync {
    async fn split(&self, text: &str) -> Result<Vec<Chunk>, TextSplitterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TextSplitterError {
    #[error("invalid chunk length: {0}")]
    InvalidMaxLength(usize),
    #[error("splitting failed: {0}")]
    SplittingFailed(String),
}
