use std::sync::Arc;

use crate::application::ports::{FileLoader, StagingStore, TextSplitter};
use crate::domain::{
    Chunk, Document, DocumentFormat, DocumentTask, EmptyMessageError, ExtractedDocument, Message,
    OwnerId, SessionId, SessionNaming, StagedFile, UploadStage,
};

use super::{ChunkProcessor, SessionError, SessionStore};

pub const NOTHING_EXTRACTED_MESSAGE: &str = "Could not extract text from this file.";
pub const PREVIEW_CHARS: usize = 500;

#[derive(Debug)]
pub struct UploadRequest {
    pub owner_id: OwnerId,
    pub session_id: Option<SessionId>,
    pub task: DocumentTask,
    pub document: Document,
    pub staged: StagedFile,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Processed {
        session_id: SessionId,
        file_name: String,
        preview: String,
        result: String,
        failed_segments: usize,
    },
    NothingExtracted {
        file_name: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("uploaded file is empty")]
    EmptyFile,
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    #[error("invalid transcript message: {0}")]
    Message(#[from] EmptyMessageError),
}

/// Deletes the staged upload when the pipeline leaves scope.
///
/// `release` performs the deletion inline; `Drop` is the fallback when the
/// run is abandoned before reaching it.
struct StagedFileGuard {
    store: Arc<dyn StagingStore>,
    file: Option<StagedFile>,
}

impl StagedFileGuard {
    fn new(store: Arc<dyn StagingStore>, file: StagedFile) -> Self {
        Self {
            store,
            file: Some(file),
        }
    }

    async fn release(mut self) {
        if let Some(file) = self.file.take() {
            if let Err(e) = self.store.delete(&file).await {
                tracing::warn!(error = %e, path = %file, "Failed to delete staged upload");
            }
        }
    }
}

impl Drop for StagedFileGuard {
    fn drop(&mut self) {
        let Some(file) = self.file.take() else {
            return;
        };
        let store = self.store.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = store.delete(&file).await {
                        tracing::warn!(error = %e, path = %file, "Failed to delete abandoned upload");
                    }
                });
            }
            Err(_) => {
                if let Err(e) = std::fs::remove_file(file.path()) {
                    tracing::warn!(error = %e, path = %file, "Failed to delete abandoned upload");
                }
            }
        }
    }
}

/// Upload flow: extract, chunk, process each chunk, record the exchange.
pub struct UploadPipeline {
    file_loader: Arc<dyn FileLoader>,
    text_splitter: Arc<dyn TextSplitter>,
    processor: Arc<ChunkProcessor>,
    sessions: Arc<SessionStore>,
    staging_store: Arc<dyn StagingStore>,
}

impl UploadPipeline {
    pub fn new(
        file_loader: Arc<dyn FileLoader>,
        text_splitter: Arc<dyn TextSplitter>,
        processor: Arc<ChunkProcessor>,
        sessions: Arc<SessionStore>,
        staging_store: Arc<dyn StagingStore>,
    ) -> Self {
        Self {
            file_loader,
            text_splitter,
            processor,
            sessions,
            staging_store,
        }
    }

    #[tracing::instrument(
        skip(self, request),
        fields(
            document_id = %request.document.id.as_uuid(),
            filename = %request.document.filename,
            format = %request.document.format,
            task = %request.task,
        )
    )]
    pub async fn run(&self, request: UploadRequest) -> Result<UploadOutcome, UploadError> {
        let UploadRequest {
            owner_id,
            session_id,
            task,
            document,
            staged,
        } = request;

        let guard = StagedFileGuard::new(self.staging_store.clone(), staged);
        let result = self
            .process(owner_id, session_id, &task, &document, &guard)
            .await;
        guard.release().await;

        match &result {
            Ok(_) => transition(UploadStage::Done),
            Err(e) => {
                transition(UploadStage::Errored);
                tracing::error!(error = %e, "Upload pipeline failed");
            }
        }
        result
    }

    async fn process(
        &self,
        owner_id: OwnerId,
        session_id: Option<SessionId>,
        task: &DocumentTask,
        document: &Document,
        guard: &StagedFileGuard,
    ) -> Result<UploadOutcome, UploadError> {
        transition(UploadStage::Received);
        let Some(staged) = guard.file.as_ref() else {
            return Err(UploadError::EmptyFile);
        };
        if staged.size_bytes() == 0 {
            return Err(UploadError::EmptyFile);
        }

        let extracted = self.extract(document, staged).await;
        if extracted.is_empty() {
            transition(UploadStage::ExtractionEmpty);
            return Ok(UploadOutcome::NothingExtracted {
                file_name: document.filename.clone(),
            });
        }
        transition(UploadStage::Extracted);

        let mut session = self
            .sessions
            .get_or_create(
                session_id,
                owner_id,
                &SessionNaming::File(document.filename.clone()),
            )
            .await?;

        transition(UploadStage::Chunking);
        let chunks = self.chunk(&extracted.text).await;

        transition(UploadStage::Processing);
        let processed = self.processor.process(&chunks, task).await;
        let result = processed.render();
        transition(UploadStage::Aggregated);

        transition(UploadStage::Persisting);
        let user_turn = Message::user(format!(
            "📎 [File Upload] {}\n🔧 Task: {}",
            document.filename,
            task.label()
        ))?;
        let assistant_turn = Message::assistant(result.clone())?;
        self.sessions
            .append_turns(&mut session, user_turn, assistant_turn)
            .await?;

        Ok(UploadOutcome::Processed {
            session_id: session.id,
            file_name: document.filename.clone(),
            preview: extracted.preview(PREVIEW_CHARS),
            result,
            failed_segments: processed.failed_count(),
        })
    }

    async fn extract(&self, document: &Document, staged: &StagedFile) -> ExtractedDocument {
        if document.format == DocumentFormat::Unsupported {
            tracing::debug!("Unsupported format, skipping extraction");
            return ExtractedDocument::new(document, String::new());
        }

        transition(UploadStage::Extracting);
        let text = match self.file_loader.extract_text(staged.path(), document).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Extraction failed, treating document as empty");
                String::new()
            }
        };
        tracing::debug!(chars = text.chars().count(), "Extraction finished");
        ExtractedDocument::new(document, text)
    }

    async fn chunk(&self, text: &str) -> Vec<Chunk> {
        match self.text_splitter.split(text).await {
            Ok(chunks) if !chunks.is_empty() => chunks,
            Ok(_) => vec![Chunk::new(1, text.trim().to_string())],
            Err(e) => {
                tracing::warn!(error = %e, "Chunking failed, processing text as a single chunk");
                vec![Chunk::new(1, text.trim().to_string())]
            }
        }
    }
}

fn transition(stage: UploadStage) {
    tracing::debug!(stage = %stage, "Upload pipeline stage");
}
