use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat};

/// Dispatches extraction on the document's classified format.
///
/// Unsupported formats yield empty text rather than an error.
pub struct CompositeFileLoader {
    image: Arc<dyn FileLoader>,
    pdf: Arc<dyn FileLoader>,
    docx: Arc<dyn FileLoader>,
    text: Arc<dyn FileLoader>,
}

impl CompositeFileLoader {
    pub fn new(
        image: Arc<dyn FileLoader>,
        pdf: Arc<dyn FileLoader>,
        docx: Arc<dyn FileLoader>,
        text: Arc<dyn FileLoader>,
    ) -> Self {
        Self {
            image,
            pdf,
            docx,
            text,
        }
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        path: &Path,
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let adapter = match document.format {
            DocumentFormat::Image => &self.image,
            DocumentFormat::Pdf => &self.pdf,
            DocumentFormat::Docx => &self.docx,
            DocumentFormat::Text => &self.text,
            DocumentFormat::Unsupported => {
                tracing::debug!(filename = %document.filename, "No extractor for format");
                return Ok(String::new());
            }
        };

        adapter.extract_text(path, document).await
    }
}
