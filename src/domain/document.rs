use std::fmt;
use std::path::Path;

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

/// An uploaded file as seen by the extraction stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub format: DocumentFormat,
    pub size_bytes: u64,
}

impl Document {
    pub fn new(filename: String, size_bytes: u64) -> Self {
        let format = DocumentFormat::from_filename(&filename);
        Self {
            id: DocumentId::new(),
            filename,
            format,
            size_bytes,
        }
    }
}

/// Input kinds the extraction stage knows how to read.
///
/// Produced once from the upload's file name; every extractor dispatch matches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Image,
    Pdf,
    Docx,
    Text,
    Unsupported,
}

impl DocumentFormat {
    pub fn from_filename(filename: &str) -> Self {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unsupported)
    }

    pub fn from_extension(extension: &str) -> Self {
        match extension.trim_start_matches('.').to_lowercase().as_str() {
            "png" | "jpg" | "jpeg" => Self::Image,
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "txt" => Self::Text,
            _ => Self::Unsupported,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Text => "text",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw text pulled out of an upload. Lives only for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    pub document_id: DocumentId,
    pub format: DocumentFormat,
    pub text: String,
}

impl ExtractedDocument {
    pub fn new(document: &Document, text: String) -> Self {
        Self {
            document_id: document.id,
            format: document.format,
            text,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// First `max_chars` characters, with an ellipsis marker.
    pub fn preview(&self, max_chars: usize) -> String {
        let head: String = self.text.chars().take(max_chars).collect();
        format!("{head}...")
    }
}
