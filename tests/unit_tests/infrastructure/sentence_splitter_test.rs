use lexitutor::application::ports::TextSplitter;
use lexitutor::infrastructure::text_processing::{
    DEFAULT_MAX_CHUNK_LENGTH, SentenceSplitter, chunk_text,
};

use crate::helpers::prose;

fn squashed(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn given_empty_text_when_chunking_then_no_chunks() {
    assert!(chunk_text("", 100).is_empty());
}

#[test]
fn given_short_text_when_chunking_then_single_trimmed_chunk() {
    assert_eq!(
        chunk_text("  Hello there. How are you?  ", 100),
        vec!["Hello there. How are you?".to_string()]
    );
}

#[test]
fn given_long_prose_when_chunking_then_every_chunk_fits_and_order_is_kept() {
    let text = prose(4500);

    let chunks = chunk_text(&text, 2000);

    assert_eq!(chunks.len(), 3);
    assert!(chunks.iter().all(|c| c.chars().count() <= 2000));
    assert!(chunks.iter().all(|c| !c.trim().is_empty()));
    assert_eq!(squashed(&chunks.concat()), squashed(&text));
}

#[test]
fn given_sentence_longer_than_limit_when_chunking_then_it_is_emitted_whole() {
    let long_sentence = format!("{}.", "a".repeat(30));
    let text = format!("Short one. {long_sentence} Tail.");

    let chunks = chunk_text(&text, 20);

    assert_eq!(chunks, vec!["Short one.", long_sentence.as_str(), "Tail."]);
}

#[test]
fn given_newlines_when_chunking_then_they_end_sentences() {
    let chunks = chunk_text("first line\nsecond line\nthird line", 12);

    assert_eq!(chunks, vec!["first line", "second line", "third line"]);
}

#[test]
fn given_multibyte_text_when_chunking_then_limit_counts_characters() {
    let text = "Tôi yêu tiếng Anh. Bạn có khỏe không?";

    let chunks = chunk_text(text, 20);

    assert_eq!(chunks, vec!["Tôi yêu tiếng Anh.", "Bạn có khỏe không?"]);
}

#[test]
fn given_zero_limit_when_building_splitter_then_rejected() {
    assert!(SentenceSplitter::new(0).is_err());
    assert_eq!(SentenceSplitter::default().max_length(), DEFAULT_MAX_CHUNK_LENGTH);
}

#[tokio::test]
async fn given_text_when_splitting_then_chunks_are_numbered_from_one() {
    let splitter = SentenceSplitter::new(15).unwrap();

    let chunks = splitter.split("One sentence. Two sentence. Three.").await.unwrap();

    let indices: Vec<usize> = chunks.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    assert_eq!(chunks[0].text, "One sentence.");
}
