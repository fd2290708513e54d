use chrono::{DateTime, Utc};

use super::{Message, OwnerId, SessionId};

const DEFAULT_SESSION_NAME: &str = "Chat session";

/// A running chat thread owned by one caller.
///
/// The message log is append-only: entries are never edited or reordered.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    pub id: SessionId,
    pub owner_id: OwnerId,
    pub name: String,
    pub role_play: Option<String>,
    messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationSession {
    pub fn new(owner_id: OwnerId, naming: &SessionNaming) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            owner_id,
            name: naming.display_name(),
            role_play: naming.role_play().map(str::to_string),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a session from persisted state.
    pub fn restore(
        id: SessionId,
        owner_id: OwnerId,
        name: String,
        role_play: Option<String>,
        messages: Vec<Message>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            name,
            role_play,
            messages,
            created_at,
            updated_at,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn append(&mut self, message: Message) {
        self.updated_at = Utc::now().max(message.created_at);
        self.messages.push(message);
    }

    pub fn is_owned_by(&self, owner_id: OwnerId) -> bool {
        self.owner_id == owner_id
    }
}

/// Context used to name a session created lazily by a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNaming {
    RolePlay(String),
    File(String),
    Default,
}

impl SessionNaming {
    pub fn display_name(&self) -> String {
        match self {
            SessionNaming::RolePlay(label) => format!("Practice: {label}"),
            SessionNaming::File(file_name) => format!("File: {file_name}"),
            SessionNaming::Default => DEFAULT_SESSION_NAME.to_string(),
        }
    }

    pub fn role_play(&self) -> Option<&str> {
        match self {
            SessionNaming::RolePlay(label) => Some(label),
            _ => None,
        }
    }
}
