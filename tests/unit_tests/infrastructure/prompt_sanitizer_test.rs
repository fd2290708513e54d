use lexitutor::infrastructure::observability::sanitize_prompt;

#[test]
fn given_empty_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt(""), "[EMPTY]");
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_returns_unchanged() {
    let prompt = "How do I use the present perfect?";
    assert_eq!(sanitize_prompt(prompt), prompt);
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncates_with_length() {
    let prompt = "a".repeat(150);
    let result = sanitize_prompt(&prompt);
    assert!(result.contains("... (150 chars total)"));
    assert!(result.starts_with(&"a".repeat(100)));
}

#[test]
fn given_long_vietnamese_prompt_when_sanitizing_then_truncates_on_char_boundary() {
    let prompt = "ồ".repeat(120);
    let result = sanitize_prompt(&prompt);
    assert!(result.starts_with(&"ồ".repeat(100)));
    assert!(result.ends_with("(120 chars total)"));
}

#[test]
fn given_bearer_token_when_sanitizing_then_redacts_token() {
    let prompt = "Authorization: Bearer sk-abc123xyz";
    let result = sanitize_prompt(prompt);
    assert!(result.contains("Bearer [REDACTED]"));
    assert!(!result.contains("sk-abc123xyz"));
}

#[test]
fn given_api_key_when_sanitizing_then_redacts_key() {
    let result = sanitize_prompt("Send request with api_key=secret123 please");
    assert_eq!(result, "Send request with api_key=[REDACTED] please");
}
