use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat};

use super::text_sanitizer::sanitize_extracted_text;

pub struct PdfAdapter {
    timeout: Duration,
}

impl Default for PdfAdapter {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl PdfAdapter {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn extract_pages(path: &Path) -> Result<Vec<String>, FileLoaderError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            match doc.extract_text(page_index) {
                Ok(text) if !text.trim().is_empty() => pages.push(text),
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(page = page_index + 1, error = %e, "Skipping unreadable page");
                }
            }
        }

        Ok(pages)
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, path),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract_text(
        &self,
        path: &Path,
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.format != DocumentFormat::Pdf {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.to_string(),
            ));
        }

        let owned_path: PathBuf = path.to_path_buf();
        let pages = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::extract_pages(&owned_path)),
        )
        .await
        .map_err(|_| FileLoaderError::TimedOut(self.timeout))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");

        let sanitized_pages: Vec<String> = pages
            .iter()
            .map(|p| sanitize_extracted_text(p))
            .filter(|t| !t.is_empty())
            .collect();

        if sanitized_pages.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        Ok(sanitized_pages.join("\n\n"))
    }
}
