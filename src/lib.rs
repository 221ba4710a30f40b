//! # docxtext
//!
//! Plain-text extraction from Word (`.docx`) document packages.
//!
//! The body member `word/document.xml` is read out of the ZIP package, every
//! WordprocessingML paragraph (`w:p`) is collected with the text of its
//! `w:t` runs, and paragraphs that carry text are joined with newlines.
//!
//! ## Quick Start
//!
//! ```no_run
//! // Typed errors
//! let text = docxtext::extract_text("document.docx")?;
//! println!("{}", text);
//!
//! // Never fails: errors come back as "Error reading .docx file: ..."
//! println!("{}", docxtext::extract_text_or_message("document.docx"));
//! # Ok::<(), docxtext::Error>(())
//! ```
//!
//! ## Structured access
//!
//! ```no_run
//! use docxtext::{extract, ExtractOptions};
//!
//! let options = ExtractOptions::new().with_normalize(true);
//! let extracted = extract("report.docx", &options)?;
//! for paragraph in extracted.paragraphs() {
//!     println!("- {}", paragraph);
//! }
//! # Ok::<(), docxtext::Error>(())
//! ```

pub mod container;
pub mod docx;
pub mod error;
pub mod model;
pub mod options;
pub mod render;

// Re-exports
pub use container::{DocxContainer, DOCUMENT_PART};
pub use docx::{DocxParser, WORDPROCESSING_NS};
pub use error::{error_message, Error, Result, ERROR_PREFIX};
pub use model::ExtractedText;
pub use options::ExtractOptions;

use std::path::Path;

/// Extract paragraph text from a `.docx` file.
///
/// # Example
///
/// ```no_run
/// use docxtext::{extract, ExtractOptions};
///
/// let extracted = extract("document.docx", &ExtractOptions::default())?;
/// println!("{} paragraphs", extracted.len());
/// # Ok::<(), docxtext::Error>(())
/// ```
pub fn extract(path: impl AsRef<Path>, options: &ExtractOptions) -> Result<ExtractedText> {
    DocxParser::open(path)?.parse(options)
}

/// Extract paragraph text from a `.docx` package held in memory.
///
/// # Example
///
/// ```no_run
/// use docxtext::{extract_bytes, ExtractOptions};
///
/// let data = std::fs::read("document.docx")?;
/// let extracted = extract_bytes(&data, &ExtractOptions::default())?;
/// # Ok::<(), docxtext::Error>(())
/// ```
pub fn extract_bytes(data: &[u8], options: &ExtractOptions) -> Result<ExtractedText> {
    DocxParser::from_bytes(data.to_vec())?.parse(options)
}

/// Extract the text of a `.docx` file, paragraphs joined with `\n`.
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    extract_text_with_options(path, &ExtractOptions::default())
}

/// Extract the text of a `.docx` file using the given options.
pub fn extract_text_with_options(
    path: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<String> {
    let extracted = extract(path, options)?;
    Ok(render::to_text(&extracted, options))
}

/// Extract the text of a `.docx` file, or describe why that failed.
///
/// Any failure opening the package, reading the body or parsing the XML is
/// returned as `"Error reading .docx file: <reason>"` instead of an error.
///
/// # Example
///
/// ```no_run
/// let output = docxtext::extract_text_or_message("missing.docx");
/// assert!(output.starts_with(docxtext::ERROR_PREFIX));
/// ```
pub fn extract_text_or_message(path: impl AsRef<Path>) -> String {
    extract_text(path).unwrap_or_else(|e| {
        log::debug!("extraction failed: {:?}", e);
        error_message(&e)
    })
}
