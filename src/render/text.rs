//! Plain text renderer.

use crate::model::ExtractedText;
use crate::options::ExtractOptions;

/// Join extracted paragraphs with the configured separator.
pub fn to_text(extracted: &ExtractedText, options: &ExtractOptions) -> String {
    extracted.join(&options.separator)
}
