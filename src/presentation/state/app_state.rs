use std::sync::Arc;

use crate::application::ports::StagingStore;
use crate::application::services::{ChatPipeline, SessionStore, UploadPipeline};

#[derive(Clone)]
pub struct AppState {
    pub chat_pipeline: Arc<ChatPipeline>,
    pub upload_pipeline: Arc<UploadPipeline>,
    pub sessions: Arc<SessionStore>,
    pub staging_store: Arc<dyn StagingStore>,
    pub max_upload_bytes: usize,
}
