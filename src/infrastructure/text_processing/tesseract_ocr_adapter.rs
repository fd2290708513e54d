use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat};

/// Optical character recognition through the `tesseract` command-line engine.
///
/// The engine runs as a child process per image; `kill_on_drop` reaps it
/// when the call times out or is abandoned.
pub struct TesseractOcrAdapter {
    binary: String,
    languages: String,
    timeout: Duration,
}

impl TesseractOcrAdapter {
    pub fn new(binary: impl Into<String>, languages: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            languages: languages.into(),
            timeout,
        }
    }
}

#[async_trait]
impl FileLoader for TesseractOcrAdapter {
    #[tracing::instrument(
        skip(self, path),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
            languages = %self.languages,
        )
    )]
    async fn extract_text(
        &self,
        path: &Path,
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.format != DocumentFormat::Image {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.to_string(),
            ));
        }

        let child = Command::new(&self.binary)
            .arg(path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.languages)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                FileLoaderError::ExtractionFailed(format!(
                    "failed to start OCR engine '{}': {e}",
                    self.binary
                ))
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| FileLoaderError::TimedOut(self.timeout))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FileLoaderError::ExtractionFailed(format!(
                "OCR engine exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::info!(chars = text.chars().count(), "OCR complete");
        Ok(text)
    }
}
