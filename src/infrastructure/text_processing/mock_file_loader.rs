use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::Document;

/// Returns fixed text for every document, or fails when built with `failing`.
#[derive(Default)]
pub struct MockFileLoader {
    text: String,
    fail: bool,
    calls: AtomicUsize,
}

impl MockFileLoader {
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl FileLoader for MockFileLoader {
    async fn extract_text(&self, _path: &Path, doc: &Document) -> Result<String, FileLoaderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(FileLoaderError::ExtractionFailed(format!(
                "scripted failure for {}",
                doc.filename
            )));
        }
        Ok(self.text.clone())
    }
}
