use std::path::PathBuf;
use std::sync::Mutex;

use bytes::Bytes;

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::StagedFile;

/// Keeps nothing on disk; records which staged files were deleted.
#[derive(Default)]
pub struct MockStagingStore {
    deleted: Mutex<Vec<PathBuf>>,
}

impl MockStagingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deleted(&self) -> Vec<PathBuf> {
        self.deleted
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl StagingStore for MockStagingStore {
    async fn store(&self, filename: &str, data: Bytes) -> Result<StagedFile, StagingStoreError> {
        Ok(StagedFile::new(
            PathBuf::from("mock-uploads").join(filename),
            data.len() as u64,
        ))
    }

    async fn delete(&self, file: &StagedFile) -> Result<(), StagingStoreError> {
        if let Ok(mut deleted) = self.deleted.lock() {
            deleted.push(file.path().to_path_buf());
        }
        Ok(())
    }
}
