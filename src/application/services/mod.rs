mod chat_pipeline;
mod chunk_processor;
mod content_moderator;
mod language_model_gateway;
mod runtime_config;
mod session_store;
mod upload_pipeline;

pub use chat_pipeline::{ChatError, ChatOutcome, ChatPipeline, ChatRequest};
pub use chunk_processor::{
    ChunkProcessor, ProcessedDocument, SEGMENT_ERROR_PLACEHOLDER, SEGMENT_SEPARATOR,
    SEGMENT_SKIPPED_PLACEHOLDER, SegmentError, SegmentOutcome,
};
pub use content_moderator::{BLOCKED_REDIRECT_MESSAGE, BLOCKED_SUGGESTION, ContentModerator};
pub use language_model_gateway::{
    CallBudget, GatewaySettings, LanguageModelGateway, TUTOR_PERSONA,
};
pub use runtime_config::{
    DEFAULT_BLOCKED_KEYWORDS, DEFAULT_SYSTEM_PROMPT, FALLBACK_BLOCKED_KEYWORDS, RuntimeConfig,
    RuntimeConfigCache,
};
pub use session_store::{SessionError, SessionStore};
pub use upload_pipeline::{
    NOTHING_EXTRACTED_MESSAGE, PREVIEW_CHARS, UploadError, UploadOutcome, UploadPipeline,
    UploadRequest,
};
