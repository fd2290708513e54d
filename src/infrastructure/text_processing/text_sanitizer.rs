use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static HYPHENATED_LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<head>\w)-[ \t]*\r?\n[ \t]*(?P<tail>\w)").unwrap());

/// Normalizes text pulled out of PDF and DOCX files before it is chunked.
///
/// NFKC-folds ligatures and full-width forms, rejoins words hyphenated across
/// a line break, drops control characters, collapses runs of spaces and keeps
/// at most one blank line between paragraphs.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw
        .nfkc()
        .filter(|ch| !is_noise(*ch))
        .collect();
    let rejoined = HYPHENATED_LINE_BREAK.replace_all(&normalized, "$head$tail");

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in rejoined.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() {
            current.push('\n');
        }
        push_collapsed(line, &mut current);
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs.join("\n\n")
}

fn is_noise(ch: char) -> bool {
    ch == '\u{feff}' || (ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'))
}

fn push_collapsed(line: &str, out: &mut String) {
    let mut last_was_space = false;
    for ch in line.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
}
