use std::fmt;

/// The processing directive applied to every chunk of an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentTask {
    TranslateToVietnamese,
    TranslateToEnglish,
    FixGrammar,
    Generic(String),
}

impl DocumentTask {
    /// Parses the `task` form field. A missing or blank value means translation.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None | Some("translate") => Self::TranslateToVietnamese,
            Some("translate_vi_to_en") => Self::TranslateToEnglish,
            Some("fix_grammar") => Self::FixGrammar,
            Some(other) => Self::Generic(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::TranslateToVietnamese => "translate",
            Self::TranslateToEnglish => "translate_vi_to_en",
            Self::FixGrammar => "fix_grammar",
            Self::Generic(name) => name,
        }
    }

    /// Human-readable label recorded in the session transcript.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TranslateToVietnamese => "English → Vietnamese translation",
            Self::TranslateToEnglish => "Vietnamese → English translation",
            Self::FixGrammar => "Grammar review",
            Self::Generic(_) => "Text processing",
        }
    }

    pub fn prompt_prefix(&self) -> &'static str {
        match self {
            Self::TranslateToVietnamese => {
                "Translate the following text into Vietnamese (return only the translation):\n\n"
            }
            Self::TranslateToEnglish => {
                "Please translate the following Vietnamese text to English (only return the translation result):\n\n"
            }
            Self::FixGrammar => {
                "Check the grammar of the following text and suggest more natural phrasing. Keep the original language and only give comments and corrected examples where needed:\n\n"
            }
            Self::Generic(_) => "Process the following text:\n\n",
        }
    }
}

impl fmt::Display for DocumentTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
