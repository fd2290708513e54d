use std::sync::Arc;

use crate::application::ports::LlmClientError;
use crate::domain::{
    ChatStage, EmptyMessageError, Message, OwnerId, SessionId, SessionNaming,
};

use super::{
    BLOCKED_SUGGESTION, ContentModerator, LanguageModelGateway, RuntimeConfigCache, SessionError,
    SessionStore,
};

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub owner_id: OwnerId,
    pub message: String,
    pub session_id: Option<SessionId>,
    pub role_play: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    Blocked {
        message: String,
        suggestion: String,
    },
    Replied {
        session_id: SessionId,
        reply: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message must not be empty")]
    EmptyMessage(#[from] EmptyMessageError),
    #[error("language model call failed: {0}")]
    Gateway(#[from] LlmClientError),
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

/// Typed-message flow: moderate, one conversational call with the full history, persist both turns.
pub struct ChatPipeline {
    moderator: ContentModerator,
    runtime_config: Arc<RuntimeConfigCache>,
    gateway: Arc<LanguageModelGateway>,
    sessions: Arc<SessionStore>,
}

impl ChatPipeline {
    pub fn new(
        moderator: ContentModerator,
        runtime_config: Arc<RuntimeConfigCache>,
        gateway: Arc<LanguageModelGateway>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            moderator,
            runtime_config,
            gateway,
            sessions,
        }
    }

    #[tracing::instrument(
        skip(self, request),
        fields(owner_id = %request.owner_id, session_id = ?request.session_id, role_play = ?request.role_play)
    )]
    pub async fn send(&self, request: ChatRequest) -> Result<ChatOutcome, ChatError> {
        transition(ChatStage::Received);
        let user_turn = Message::user(request.message)?;

        let config = self.runtime_config.snapshot().await;
        let verdict = self.moderator.evaluate(&user_turn.content, &config);
        if verdict.blocked {
            transition(ChatStage::Blocked);
            return Ok(ChatOutcome::Blocked {
                message: verdict.reason.unwrap_or_default(),
                suggestion: BLOCKED_SUGGESTION.to_string(),
            });
        }
        if verdict.needs_context_check {
            tracing::debug!("Message has no on-topic signal, leaving redirection to the model");
        }
        transition(ChatStage::Allowed);

        let role_play = request
            .role_play
            .filter(|label| !label.trim().is_empty());
        let naming = match &role_play {
            Some(label) => SessionNaming::RolePlay(label.clone()),
            None => SessionNaming::Default,
        };
        let mut session = self
            .sessions
            .get_or_create(request.session_id, request.owner_id, &naming)
            .await?;
        transition(ChatStage::SessionResolved);

        let role_play = role_play.or_else(|| session.role_play.clone());
        let mut history = session.messages().to_vec();
        history.push(user_turn.clone());

        let reply = self
            .gateway
            .converse(&config, role_play.as_deref(), &history)
            .await?;
        transition(ChatStage::ModelCalled);

        let assistant_turn = Message::assistant(reply.clone())?;
        self.sessions
            .append_turns(&mut session, user_turn, assistant_turn)
            .await?;
        transition(ChatStage::Persisted);

        transition(ChatStage::Done);
        Ok(ChatOutcome::Replied {
            session_id: session.id,
            reply,
        })
    }

    /// Word explanation; stateless and unmoderated.
    pub async fn explain(&self, word: &str) -> Result<String, ChatError> {
        Ok(self.gateway.explain_word(word.trim()).await?)
    }
}

fn transition(stage: ChatStage) {
    tracing::debug!(stage = %stage, "Chat pipeline stage");
}
