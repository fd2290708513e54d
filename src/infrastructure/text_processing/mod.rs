mod composite_file_loader;
mod docx_adapter;
mod mock_file_loader;
mod pdf_adapter;
mod plain_text_adapter;
mod sentence_splitter;
mod tesseract_ocr_adapter;
mod text_sanitizer;

pub use composite_file_loader::CompositeFileLoader;
pub use docx_adapter::DocxAdapter;
pub use mock_file_loader::MockFileLoader;
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::PlainTextAdapter;
pub use sentence_splitter::{DEFAULT_MAX_CHUNK_LENGTH, SentenceSplitter, chunk_text};
pub use tesseract_ocr_adapter::TesseractOcrAdapter;
pub use text_sanitizer::sanitize_extracted_text;
