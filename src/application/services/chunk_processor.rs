use std::sync::Arc;

use crate::application::ports::LlmClientError;
use crate::domain::{Chunk, DocumentTask};

use super::LanguageModelGateway;

pub const SEGMENT_ERROR_PLACEHOLDER: &str = "[Error processing this segment]";
pub const SEGMENT_SKIPPED_PLACEHOLDER: &str =
    "[Segment skipped: document exceeds the processing limit]";
pub const SEGMENT_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Debug, thiserror::Error)]
pub enum SegmentError {
    #[error("gateway: {0}")]
    Gateway(#[from] LlmClientError),
    #[error("chunk {index} is beyond the limit of {limit} chunks per document")]
    Skipped { index: usize, limit: usize },
}

#[derive(Debug)]
pub struct SegmentOutcome {
    pub index: usize,
    pub result: Result<String, SegmentError>,
}

/// Per-chunk results of one document, in input order.
#[derive(Debug)]
pub struct ProcessedDocument {
    segments: Vec<SegmentOutcome>,
}

impl ProcessedDocument {
    pub fn segments(&self) -> &[SegmentOutcome] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.segments.iter().filter(|s| s.result.is_err()).count()
    }

    /// Joins every segment with [`SEGMENT_SEPARATOR`], substituting a visible
    /// placeholder for each failed one.
    pub fn render(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match &segment.result {
                Ok(text) => text.as_str(),
                Err(SegmentError::Gateway(_)) => SEGMENT_ERROR_PLACEHOLDER,
                Err(SegmentError::Skipped { .. }) => SEGMENT_SKIPPED_PLACEHOLDER,
            })
            .collect::<Vec<_>>()
            .join(SEGMENT_SEPARATOR)
    }
}

/// Drives chunks through the gateway one at a time, in order.
///
/// A failing chunk never aborts the document: the output always holds exactly
/// one segment per input chunk.
pub struct ChunkProcessor {
    gateway: Arc<LanguageModelGateway>,
    max_chunks: usize,
}

impl ChunkProcessor {
    pub fn new(gateway: Arc<LanguageModelGateway>, max_chunks: usize) -> Self {
        Self {
            gateway,
            max_chunks,
        }
    }

    #[tracing::instrument(skip(self, chunks, task), fields(chunk_count = chunks.len(), task = %task))]
    pub async fn process(&self, chunks: &[Chunk], task: &DocumentTask) -> ProcessedDocument {
        let mut segments = Vec::with_capacity(chunks.len());

        for (position, chunk) in chunks.iter().enumerate() {
            if position >= self.max_chunks {
                segments.push(SegmentOutcome {
                    index: chunk.index,
                    result: Err(SegmentError::Skipped {
                        index: chunk.index,
                        limit: self.max_chunks,
                    }),
                });
                continue;
            }

            let result = self
                .gateway
                .run_task(task, chunk)
                .await
                .map_err(SegmentError::from);

            if let Err(e) = &result {
                tracing::warn!(chunk_index = chunk.index, error = %e, "Chunk processing failed");
            }

            segments.push(SegmentOutcome {
                index: chunk.index,
                result,
            });
        }

        let document = ProcessedDocument { segments };
        tracing::info!(
            segments = document.len(),
            failed = document.failed_count(),
            "Document processing complete"
        );
        document
    }
}
