use async_trait::async_trait;

use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::Chunk;

pub const DEFAULT_MAX_CHUNK_LENGTH: usize = 2000;

/// Greedy sentence packer: units end at `.`, `!`, `?` or a newline and are
/// accumulated until the next one would overflow `max_length`.
pub struct SentenceSplitter {
    max_length: usize,
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_CHUNK_LENGTH,
        }
    }
}

impl SentenceSplitter {
    pub fn new(max_length: usize) -> Result<Self, TextSplitterError> {
        if max_length == 0 {
            return Err(TextSplitterError::InvalidMaxLength(max_length));
        }
        Ok(Self { max_length })
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

#[async_trait]
impl TextSplitter for SentenceSplitter {
    async fn split(&self, text: &str) -> Result<Vec<Chunk>, TextSplitterError> {
        let chunks: Vec<Chunk> = chunk_text(text, self.max_length)
            .into_iter()
            .enumerate()
            .map(|(i, text)| Chunk::new(i + 1, text))
            .collect();

        tracing::debug!(
            chunk_count = chunks.len(),
            max_length = self.max_length,
            "Text split into chunks"
        );
        Ok(chunks)
    }
}

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '\n')
}

/// Runs of non-terminators followed by their terminators. A trailing run
/// without a terminator is a unit too; terminators before the first run are dropped.
fn sentence_units(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start: Option<usize> = None;
    let mut in_terminators = false;

    for (i, ch) in text.char_indices() {
        let terminator = is_terminator(ch);
        match start {
            None if !terminator => {
                start = Some(i);
                in_terminators = false;
            }
            None => {}
            Some(_) if terminator => in_terminators = true,
            Some(s) if in_terminators => {
                units.push(&text[s..i]);
                start = Some(i);
                in_terminators = false;
            }
            Some(_) => {}
        }
    }

    if let Some(s) = start {
        units.push(&text[s..]);
    }
    units
}

/// Splits `text` into trimmed, non-empty chunks of at most `max_length`
/// characters. A single unit longer than the limit is emitted whole.
pub fn chunk_text(text: &str, max_length: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut units = sentence_units(text);
    if units.is_empty() {
        units.push(text);
    }

    let mut chunks = Vec::new();
    let mut buffer = String::new();
    let mut buffer_chars = 0;

    for unit in units {
        let unit_chars = unit.chars().count();
        if buffer_chars + unit_chars > max_length {
            push_trimmed(&mut chunks, &buffer);
            buffer.clear();
            buffer_chars = 0;
        }
        buffer.push_str(unit);
        buffer_chars += unit_chars;
    }
    push_trimmed(&mut chunks, &buffer);

    chunks
}

fn push_trimmed(chunks: &mut Vec<String>, buffer: &str) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
