//! JSON renderer.

use crate::error::{Error, Result};
use crate::model::ExtractedText;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Serialize extracted text as `{"paragraphs": [...]}`.
pub fn to_json(extracted: &ExtractedText, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(extracted),
        JsonFormat::Pretty => serde_json::to_string_pretty(extracted),
    };
    json.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
