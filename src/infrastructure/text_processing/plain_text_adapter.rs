use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat};

/// Reads `.txt` uploads as UTF-8, verbatim.
pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        path: &Path,
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.format != DocumentFormat::Text {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.to_string(),
            ));
        }

        let data = tokio::fs::read(path).await?;
        String::from_utf8(data).map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))
    }
}
