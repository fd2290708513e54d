pub mod api_types;
mod chat;
mod error;
mod health;
mod identity;
mod sessions;
mod upload;

pub use chat::{explain_handler, send_message_handler};
pub use error::ApiError;
pub use health::health_handler;
pub use identity::{OwnerIdentity, USER_ID_HEADER};
pub use sessions::{history_handler, session_handler};
pub use upload::upload_handler;
