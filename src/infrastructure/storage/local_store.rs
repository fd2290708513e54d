use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};
use uuid::Uuid;

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::StagedFile;

/// Upload directory on local disk. Each upload gets a unique `{uuid}{ext}` name.
pub struct LocalStagingStore {
    inner: Arc<LocalFileSystem>,
    base_path: PathBuf,
}

impl LocalStagingStore {
    pub fn new(base_path: PathBuf) -> Result<Self, StagingStoreError> {
        std::fs::create_dir_all(&base_path).map_err(StagingStoreError::Io)?;
        let base_path = base_path.canonicalize().map_err(StagingStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            base_path,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn staged_name(filename: &str) -> String {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();
        format!("{}{}", Uuid::new_v4(), extension)
    }

    fn store_path(&self, file: &StagedFile) -> Result<StorePath, StagingStoreError> {
        let relative = file
            .path()
            .strip_prefix(&self.base_path)
            .map_err(|_| {
                StagingStoreError::DeleteFailed(format!("{file} is outside the upload directory"))
            })?
            .to_str()
            .ok_or_else(|| StagingStoreError::DeleteFailed(format!("{file} is not valid UTF-8")))?;
        Ok(StorePath::from(relative))
    }
}

#[async_trait::async_trait]
impl StagingStore for LocalStagingStore {
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    async fn store(&self, filename: &str, data: Bytes) -> Result<StagedFile, StagingStoreError> {
        let name = Self::staged_name(filename);
        let size_bytes = data.len() as u64;

        self.inner
            .put(&StorePath::from(name.as_str()), PutPayload::from(data))
            .await
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;

        let staged = StagedFile::new(self.base_path.join(&name), size_bytes);
        tracing::debug!(path = %staged, "Upload staged");
        Ok(staged)
    }

    async fn delete(&self, file: &StagedFile) -> Result<(), StagingStoreError> {
        let store_path = self.store_path(file)?;
        match self.inner.delete(&store_path).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => {
                tracing::debug!(path = %file, "Staged upload deleted");
                Ok(())
            }
            Err(e) => Err(StagingStoreError::DeleteFailed(e.to_string())),
        }
    }
}
