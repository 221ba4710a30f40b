//! DOCX (Word) body text extraction.

mod parser;

pub use parser::{parse_body, DocxParser, WORDPROCESSING_NS};
