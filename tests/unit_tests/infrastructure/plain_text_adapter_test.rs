use std::io::Write;

use lexitutor::application::ports::{FileLoader, FileLoaderError};
use lexitutor::domain::Document;
use lexitutor::infrastructure::text_processing::PlainTextAdapter;

#[tokio::test]
async fn given_utf8_file_when_extracting_then_returns_content_verbatim() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "Xin chào!\nHello again.").unwrap();
    let document = Document::new("note.txt".to_string(), 24);

    let text = PlainTextAdapter
        .extract_text(file.path(), &document)
        .await
        .unwrap();

    assert_eq!(text, "Xin chào!\nHello again.");
}

#[tokio::test]
async fn given_invalid_utf8_when_extracting_then_extraction_failed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0xff, 0xfe, 0x00]).unwrap();
    let document = Document::new("binary.txt".to_string(), 3);

    let result = PlainTextAdapter.extract_text(file.path(), &document).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_non_text_document_when_extracting_then_unsupported() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let document = Document::new("paper.pdf".to_string(), 0);

    let result = PlainTextAdapter.extract_text(file.path(), &document).await;

    assert!(matches!(result, Err(FileLoaderError::UnsupportedFormat(_))));
}
