use bytes::Bytes;

use crate::domain::StagedFile;

/// Temporary on-disk storage for uploads awaiting extraction.
#[async_trait::async_trait]
pub trait StagingStore: Send + Sync {
    async fn store(&self, filename: &str, data: Bytes) -> Result<StagedFile, StagingStoreError>;

    async fn delete(&self, file: &StagedFile) -> Result<(), StagingStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StagingStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
