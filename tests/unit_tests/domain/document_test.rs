use lexitutor::domain::{Document, DocumentFormat, ExtractedDocument};

#[test]
fn given_known_extensions_when_classifying_then_maps_to_format() {
    assert_eq!(DocumentFormat::from_filename("scan.PNG"), DocumentFormat::Image);
    assert_eq!(DocumentFormat::from_filename("photo.jpeg"), DocumentFormat::Image);
    assert_eq!(DocumentFormat::from_filename("paper.pdf"), DocumentFormat::Pdf);
    assert_eq!(DocumentFormat::from_filename("essay.docx"), DocumentFormat::Docx);
    assert_eq!(DocumentFormat::from_filename("notes.txt"), DocumentFormat::Text);
}

#[test]
fn given_unknown_or_missing_extension_when_classifying_then_unsupported() {
    assert_eq!(DocumentFormat::from_filename("diagram.bmp"), DocumentFormat::Unsupported);
    assert_eq!(DocumentFormat::from_filename("legacy.doc"), DocumentFormat::Unsupported);
    assert_eq!(DocumentFormat::from_filename("README"), DocumentFormat::Unsupported);
    assert!(!DocumentFormat::Unsupported.is_supported());
}

#[test]
fn given_extension_with_leading_dot_when_classifying_then_dot_is_ignored() {
    assert_eq!(DocumentFormat::from_extension(".PDF"), DocumentFormat::Pdf);
}

#[test]
fn given_new_document_when_created_then_format_follows_filename() {
    let document = Document::new("lesson.txt".to_string(), 42);

    assert_eq!(document.format, DocumentFormat::Text);
    assert_eq!(document.size_bytes, 42);
}

#[test]
fn given_long_text_when_previewing_then_truncates_by_characters() {
    let document = Document::new("lesson.txt".to_string(), 10);
    let extracted = ExtractedDocument::new(&document, "Xin chào thế giới".to_string());

    assert_eq!(extracted.preview(8), "Xin chào...");
}

#[test]
fn given_whitespace_text_when_checking_then_is_empty() {
    let document = Document::new("blank.txt".to_string(), 3);
    let extracted = ExtractedDocument::new(&document, " \n\t".to_string());

    assert!(extracted.is_empty());
}
