//! Extraction options.

use crate::model::PARAGRAPH_SEPARATOR;

/// Options controlling how paragraph text is collected and joined.
///
/// The default reproduces plain extraction: paragraphs joined with `\n`, no
/// normalization, whitespace-only paragraphs kept.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// String placed between paragraphs when rendering text.
    pub separator: String,

    /// Apply Unicode NFC normalization to each paragraph.
    pub normalize: bool,

    /// Drop paragraphs whose text is whitespace only.
    pub skip_whitespace_only: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            separator: PARAGRAPH_SEPARATOR.to_string(),
            normalize: false,
            skip_whitespace_only: false,
        }
    }
}

impl ExtractOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paragraph separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Enable or disable dropping of whitespace-only paragraphs.
    pub fn with_skip_whitespace_only(mut self, skip: bool) -> Self {
        self.skip_whitespace_only = skip;
        self
    }
}
