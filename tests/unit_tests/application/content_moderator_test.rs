use lexitutor::application::services::{
    BLOCKED_REDIRECT_MESSAGE, ContentModerator, FALLBACK_BLOCKED_KEYWORDS, RuntimeConfig,
};

fn config_with(keywords: &[&str]) -> RuntimeConfig {
    RuntimeConfig {
        blocked_keywords: keywords.iter().map(|k| k.to_string()).collect(),
        system_prompt: None,
    }
}

#[test]
fn given_default_keywords_when_message_asks_for_math_then_blocked() {
    let moderator = ContentModerator::new();

    let verdict = moderator.evaluate("giải toán giúp tôi", &RuntimeConfig::defaults());

    assert!(verdict.blocked);
    assert_eq!(verdict.reason.as_deref(), Some(BLOCKED_REDIRECT_MESSAGE));
}

#[test]
fn given_same_message_and_config_when_evaluated_twice_then_verdicts_match() {
    let moderator = ContentModerator::new();
    let config = RuntimeConfig::defaults();

    let first = moderator.evaluate("Viết code Python cho tôi", &config);
    let second = moderator.evaluate("Viết code Python cho tôi", &config);

    assert_eq!(first, second);
    assert!(first.blocked);
}

#[test]
fn given_uppercase_message_when_keyword_matches_case_insensitively_then_blocked() {
    let moderator = ContentModerator::new();

    let verdict = moderator.evaluate("Help me with PHYSICS homework", &config_with(&["physics"]));

    assert!(verdict.blocked);
}

#[test]
fn given_short_message_when_no_keyword_matches_then_allowed_without_flag() {
    let moderator = ContentModerator::new();

    let verdict = moderator.evaluate("Hi there", &RuntimeConfig::defaults());

    assert!(!verdict.blocked);
    assert!(!verdict.needs_context_check);
}

#[test]
fn given_on_topic_message_when_evaluated_then_allowed_without_flag() {
    let moderator = ContentModerator::new();

    let verdict = moderator.evaluate(
        "What does 'serendipity' mean in a sentence?",
        &RuntimeConfig::defaults(),
    );

    assert!(!verdict.blocked);
    assert!(!verdict.needs_context_check);
}

#[test]
fn given_long_off_topic_message_when_evaluated_then_allowed_but_flagged() {
    let moderator = ContentModerator::new();

    let verdict = moderator.evaluate(
        "Tell me about your favourite football team please",
        &RuntimeConfig::defaults(),
    );

    assert!(!verdict.blocked);
    assert!(verdict.needs_context_check);
}

#[test]
fn given_fallback_list_when_message_mentions_programming_then_blocked() {
    let moderator = ContentModerator::new();

    let verdict = moderator.evaluate(
        "Can you explain this javascript snippet?",
        &config_with(FALLBACK_BLOCKED_KEYWORDS),
    );

    assert!(verdict.blocked);
}

#[test]
fn given_blank_keyword_in_list_when_evaluating_then_it_matches_nothing() {
    let moderator = ContentModerator::new();

    let verdict = moderator.evaluate("How are you today?", &config_with(&["", "  "]));

    assert!(!verdict.blocked);
}
