//! Error types for the docxtext library.

use std::io;
use thiserror::Error;

/// Result type alias for docxtext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Prefix used when an extraction failure is rendered as plain text.
pub const ERROR_PREFIX: &str = "Error reading .docx file: ";

/// Errors that can occur while extracting text from a package.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading the ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// A required package member is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Member bytes could not be decoded as text.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error during output rendering.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

/// Render an extraction failure the way the text-or-message API reports it.
pub fn error_message(err: &Error) -> String {
    format!("{}{}", ERROR_PREFIX, err)
}
