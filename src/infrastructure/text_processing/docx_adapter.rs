use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat};

use super::text_sanitizer::sanitize_extracted_text;

const DOCUMENT_PART: &str = "word/document.xml";

/// Raw text of a Word document: paragraph text only, formatting discarded.
pub struct DocxAdapter {
    timeout: Duration,
}

impl Default for DocxAdapter {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl DocxAdapter {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn read_document(path: &Path) -> Result<String, FileLoaderError> {
        let file = File::open(path)?;
        let mut archive = zip::ZipArchive::new(file)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("not a docx container: {e}")))?;
        let part = archive.by_name(DOCUMENT_PART).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("missing {DOCUMENT_PART}: {e}"))
        })?;

        paragraphs_text(BufReader::new(part))
    }
}

/// Walks WordprocessingML, keeping `w:t` runs and turning paragraph, tab and
/// break elements into whitespace. Tabs and breaks count only inside a `w:r`
/// run; `w:tab` under `w:pPr/w:tabs` is a tab-stop definition.
fn paragraphs_text<R: std::io::BufRead>(source: R) -> Result<String, FileLoaderError> {
    let mut reader = Reader::from_reader(source);
    reader.config_mut().trim_text(false);

    let mut text = String::new();
    let mut in_run = false;
    let mut in_text_run = false;
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("malformed document xml: {e}")))?;

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"r" => in_run = true,
                b"t" => in_text_run = true,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"r" => in_run = false,
                b"t" => in_text_run = false,
                b"p" => text.push_str("\n\n"),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" if in_run => text.push('\t'),
                b"br" | b"cr" if in_run => text.push('\n'),
                b"p" => text.push_str("\n\n"),
                _ => {}
            },
            Event::Text(t) if in_text_run => {
                let run = t.unescape().map_err(|e| {
                    FileLoaderError::ExtractionFailed(format!("bad text run: {e}"))
                })?;
                text.push_str(&run);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

#[async_trait]
impl FileLoader for DocxAdapter {
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
        if document.format != DocumentFormat::Docx {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.to_string(),
            ));
        }

        let owned_path: PathBuf = path.to_path_buf();
        let raw = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::read_document(&owned_path)),
        )
        .await
        .map_err(|_| FileLoaderError::TimedOut(self.timeout))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        let text = sanitize_extracted_text(&raw);
        tracing::info!(chars = text.chars().count(), "DOCX text extraction complete");

        if text.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        Ok(text)
    }
}
