mod chunk;
mod document;
mod message;
mod message_id;
mod message_role;
mod moderation;
mod owner_id;
mod pipeline_stage;
mod role_play;
mod session;
mod session_id;
mod storage_path;
mod task;

pub use chunk::Chunk;
pub use document::{Document, DocumentFormat, DocumentId, ExtractedDocument};
pub use message::{EmptyMessageError, Message};
pub use message_id::MessageId;
pub use message_role::MessageRole;
pub use moderation::ModerationVerdict;
pub use owner_id::OwnerId;
pub use pipeline_stage::{ChatStage, UploadStage};
pub use role_play::RolePlay;
pub use session::{ConversationSession, SessionNaming};
pub use session_id::SessionId;
pub use storage_path::StagedFile;
pub use task::DocumentTask;
