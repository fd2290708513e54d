const MAX_VISIBLE_CHARS: usize = 100;

const SECRET_MARKERS: &[(&str, &str)] = &[
    ("Bearer ", "Bearer [REDACTED]"),
    ("api_key=", "api_key=[REDACTED]"),
    ("password=", "password=[REDACTED]"),
    ("secret=", "secret=[REDACTED]"),
    ("token=", "token=[REDACTED]"),
];

/// Shortens user text for log lines and masks anything that looks like a credential.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = if total_chars > MAX_VISIBLE_CHARS {
        let head: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{head}... ({total_chars} chars total)")
    } else {
        trimmed.to_string()
    };

    SECRET_MARKERS
        .iter()
        .fold(visible, |text, (marker, replacement)| redact(&text, marker, replacement))
}

fn redact(text: &str, marker: &str, replacement: &str) -> String {
    let Some(idx) = text.find(marker) else {
        return text.to_string();
    };
    let value_start = idx + marker.len();
    let value_end = text[value_start..]
        .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\''))
        .map(|i| value_start + i)
        .unwrap_or(text.len());

    format!("{}{}{}", &text[..idx], replacement, &text[value_end..])
}
