use crate::domain::ModerationVerdict;

use super::RuntimeConfig;

pub const BLOCKED_REDIRECT_MESSAGE: &str = "I can only help with English learning! Let's focus on grammar, vocabulary, or conversation practice. What would you like to learn today?";
pub const BLOCKED_SUGGESTION: &str =
    "Try asking about English words, phrases, or practice conversation with me!";

const MIN_CONTEXT_CHARS: usize = 10;

const ON_TOPIC_KEYWORDS: &[&str] = &[
    "english",
    "grammar",
    "vocabulary",
    "pronunciation",
    "speaking",
    "tiếng anh",
    "tieng anh",
    "ngữ pháp",
    "ngu phap",
    "từ vựng",
    "tu vung",
    "phát âm",
    "phat am",
    "how to say",
    "what does",
    "mean",
    "translate",
];

/// Keyword gate in front of the language model.
///
/// Pure with respect to the message and the configuration snapshot it is given.
#[derive(Debug, Clone)]
pub struct ContentModerator {
    min_context_chars: usize,
    on_topic_keywords: Vec<String>,
}

impl Default for ContentModerator {
    fn default() -> Self {
        Self {
            min_context_chars: MIN_CONTEXT_CHARS,
            on_topic_keywords: ON_TOPIC_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl ContentModerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&self, message: &str, config: &RuntimeConfig) -> ModerationVerdict {
        let normalized = message.to_lowercase();

        let matched = config
            .blocked_keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .find(|k| !k.is_empty() && normalized.contains(k.as_str()));

        if let Some(keyword) = matched {
            tracing::info!(keyword = %keyword, "Message blocked by keyword filter");
            return ModerationVerdict::blocked(BLOCKED_REDIRECT_MESSAGE);
        }

        let on_topic = self
            .on_topic_keywords
            .iter()
            .any(|k| normalized.contains(k.as_str()));

        if normalized.chars().count() < self.min_context_chars || on_topic {
            ModerationVerdict::allowed()
        } else {
            ModerationVerdict::flagged()
        }
    }
}
