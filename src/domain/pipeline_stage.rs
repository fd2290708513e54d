use std::fmt;

/// States of one upload pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadStage {
    Received,
    Extracting,
    Extracted,
    ExtractionEmpty,
    Chunking,
    Processing,
    Aggregated,
    Persisting,
    Done,
    Errored,
}

impl UploadStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStage::Received => "RECEIVED",
            UploadStage::Extracting => "EXTRACTING",
            UploadStage::Extracted => "EXTRACTED",
            UploadStage::ExtractionEmpty => "EXTRACTION_EMPTY",
            UploadStage::Chunking => "CHUNKING",
            UploadStage::Processing => "PROCESSING",
            UploadStage::Aggregated => "AGGREGATED",
            UploadStage::Persisting => "PERSISTING",
            UploadStage::Done => "DONE",
            UploadStage::Errored => "ERRORED",
        }
    }
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// States of one direct-message pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatStage {
    Received,
    Blocked,
    Allowed,
    SessionResolved,
    ModelCalled,
    Persisted,
    Done,
}

impl ChatStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatStage::Received => "RECEIVED",
            ChatStage::Blocked => "BLOCKED",
            ChatStage::Allowed => "ALLOWED",
            ChatStage::SessionResolved => "SESSION_RESOLVED",
            ChatStage::ModelCalled => "MODEL_CALLED",
            ChatStage::Persisted => "PERSISTED",
            ChatStage::Done => "DONE",
        }
    }
}

impl fmt::Display for ChatStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
