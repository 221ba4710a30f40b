//! Output model for extracted document text.
//!
//! Parsers fill these structures from the body XML; renderers turn them into
//! plain text or JSON.

mod extracted;

pub use extracted::*;
