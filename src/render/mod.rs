//! Output rendering for extracted text.
//!
//! # Example
//!
//! ```no_run
//! use docxtext::{extract, render::*, ExtractOptions};
//!
//! let options = ExtractOptions::default();
//! let extracted = extract("document.docx", &options)?;
//!
//! let text = to_text(&extracted, &options);
//! let json = to_json(&extracted, JsonFormat::Pretty)?;
//! # Ok::<(), docxtext::Error>(())
//! ```

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::to_text;
