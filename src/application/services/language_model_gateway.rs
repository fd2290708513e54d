use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{CompletionRequest, LlmClient, LlmClientError, PromptMessage};
use crate::domain::{Chunk, DocumentTask, Message, RolePlay};
use crate::infrastructure::observability::sanitize_prompt;

use super::RuntimeConfig;

pub const TUTOR_PERSONA: &str = r#"You are "English Tutor AI", an AI assistant specialized in helping Vietnamese speakers learn English.

Your responsibilities:
- Help with English grammar, vocabulary, pronunciation, conversation practice, and writing
- Always respond in English (with Vietnamese explanations when needed for clarity)
- If asked about Math, Physics, Chemistry, Programming, or unrelated topics, politely decline and redirect to English learning
- Provide examples, corrections, and constructive feedback
- Be encouraging and patient

Response format:
- Keep answers clear and concise
- Use simple English for beginners
- Provide Vietnamese translations for difficult words
- Give practical examples

IMPORTANT: Only assist with English language learning. For off-topic questions, respond like:
"I'm here to help you learn English! That's an interesting topic, but let's focus on English. Would you like to know how to say [related term] in English?""#;

/// Sampling parameters for one kind of call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallBudget {
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatewaySettings {
    pub chat: CallBudget,
    pub task: CallBudget,
    pub explain: CallBudget,
    pub request_timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            chat: CallBudget {
                temperature: 0.7,
                max_tokens: 1000,
            },
            task: CallBudget {
                temperature: 0.3,
                max_tokens: 2000,
            },
            explain: CallBudget {
                temperature: 0.5,
                max_tokens: 800,
            },
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Single point of contact with the language-model provider.
///
/// Every provider failure comes back as an [`LlmClientError`]; nothing is retried here.
pub struct LanguageModelGateway {
    client: Arc<dyn LlmClient>,
    settings: GatewaySettings,
}

impl LanguageModelGateway {
    pub fn new(client: Arc<dyn LlmClient>, settings: GatewaySettings) -> Self {
        Self { client, settings }
    }

    /// Builds the system prompt: the configured prompt (or the built-in persona),
    /// extended with a role-play directive when one is requested.
    pub fn system_prompt(configured: Option<&str>, role_play: Option<&str>) -> String {
        let mut prompt = configured
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(TUTOR_PERSONA)
            .to_string();

        if let Some(label) = role_play.filter(|l| !l.trim().is_empty()) {
            prompt.push_str("\n\nROLE PLAY MODE: ");
            prompt.push_str(RolePlay::from_label(label).directive());
        }

        prompt
    }

    /// Conversational call: persona plus the full ordered history, one assistant turn back.
    #[tracing::instrument(skip(self, config, history), fields(history_len = history.len()))]
    pub async fn converse(
        &self,
        config: &RuntimeConfig,
        role_play: Option<&str>,
        history: &[Message],
    ) -> Result<String, LlmClientError> {
        let system = Self::system_prompt(config.system_prompt.as_deref(), role_play);

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(PromptMessage::system(system));
        messages.extend(history.iter().map(PromptMessage::from));

        if let Some(last) = history.last() {
            tracing::debug!(prompt = %sanitize_prompt(&last.content), "Sending conversation turn");
        }

        self.call(CompletionRequest {
            messages,
            temperature: self.settings.chat.temperature,
            max_tokens: self.settings.chat.max_tokens,
        })
        .await
    }

    /// Task call: one directive prefixed onto one chunk, with no memory of other chunks.
    #[tracing::instrument(skip(self, task, chunk), fields(task = %task, chunk_index = chunk.index))]
    pub async fn run_task(
        &self,
        task: &DocumentTask,
        chunk: &Chunk,
    ) -> Result<String, LlmClientError> {
        let prompt = format!("{}{}", task.prompt_prefix(), chunk.text);

        self.call(CompletionRequest {
            messages: vec![PromptMessage::user(prompt)],
            temperature: self.settings.task.temperature,
            max_tokens: self.settings.task.max_tokens,
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn explain_word(&self, word: &str) -> Result<String, LlmClientError> {
        let prompt = format!(
            "Explain the English word \"{word}\" in detail:\n\
             1. Definition (in English)\n\
             2. Vietnamese translation\n\
             3. Pronunciation guide\n\
             4. Part of speech\n\
             5. 2-3 example sentences\n\
             6. Common phrases or idioms using this word\n\n\
             Format your response clearly."
        );

        self.call(CompletionRequest {
            messages: vec![
                PromptMessage::system(TUTOR_PERSONA),
                PromptMessage::user(prompt),
            ],
            temperature: self.settings.explain.temperature,
            max_tokens: self.settings.explain.max_tokens,
        })
        .await
    }

    async fn call(&self, request: CompletionRequest) -> Result<String, LlmClientError> {
        let timeout = self.settings.request_timeout;

        let text = match tokio::time::timeout(timeout, self.client.complete(&request)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Language model call failed");
                return Err(e);
            }
            Err(_) => {
                tracing::warn!(timeout_ms = timeout.as_millis() as u64, "Language model call timed out");
                return Err(LlmClientError::Timeout(timeout));
            }
        };

        if text.trim().is_empty() {
            return Err(LlmClientError::InvalidResponse(
                "empty completion".to_string(),
            ));
        }

        Ok(text)
    }
}
