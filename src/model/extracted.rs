//! Paragraph-level text extracted from a document body.

use serde::{Deserialize, Serialize};

/// Paragraph separator used by [`ExtractedText::text`].
pub const PARAGRAPH_SEPARATOR: &str = "\n";

/// Text extracted from a document, one entry per non-empty paragraph.
///
/// Paragraphs appear in document order. Paragraphs without any text never
/// appear here, so joining never produces blank lines for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedText {
    /// Paragraph strings in document order.
    pub paragraphs: Vec<String>,
}

impl ExtractedText {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a paragraph. Empty strings are ignored.
    pub fn push(&mut self, paragraph: impl Into<String>) {
        let paragraph = paragraph.into();
        if !paragraph.is_empty() {
            self.paragraphs.push(paragraph);
        }
    }

    /// Paragraph strings in document order.
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// Number of paragraphs.
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// Whether no paragraph carried any text.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Paragraphs joined with a newline.
    pub fn text(&self) -> String {
        self.join(PARAGRAPH_SEPARATOR)
    }

    /// Paragraphs joined with a custom separator.
    pub fn join(&self, separator: &str) -> String {
        self.paragraphs.join(separator)
    }

    /// Number of whitespace-separated words across all paragraphs.
    pub fn word_count(&self) -> usize {
        self.paragraphs
            .iter()
            .map(|p| p.split_whitespace().count())
            .sum()
    }

    /// Number of characters across all paragraphs, separators excluded.
    pub fn char_count(&self) -> usize {
        self.paragraphs.iter().map(|p| p.chars().count()).sum()
    }
}

impl From<Vec<String>> for ExtractedText {
    fn from(paragraphs: Vec<String>) -> Self {
        let mut text = Self::new();
        for paragraph in paragraphs {
            text.push(paragraph);
        }
        text
    }
}

impl std::fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}
