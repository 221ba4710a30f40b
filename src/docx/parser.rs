//! DOCX body parser.
//!
//! Walks `word/document.xml` as a namespace-resolved event stream and
//! collects the text of every `w:t` run into the `w:p` paragraphs that
//! contain it.

use crate::container::{read_document_body, read_document_body_from_bytes};
use crate::error::{Error, Result};
use crate::model::ExtractedText;
use crate::options::ExtractOptions;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

/// WordprocessingML main namespace.
pub const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Parser for the body of a DOCX (Word) document.
///
/// The package is opened, the body member copied out and the archive
/// released before any parsing happens.
#[derive(Debug, Clone)]
pub struct DocxParser {
    body: String,
}

impl DocxParser {
    /// Open a DOCX file for parsing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let body = read_document_body(path)?;
        Ok(Self { body })
    }

    /// Create a parser from package bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let body = read_document_body_from_bytes(data)?;
        Ok(Self { body })
    }

    /// Create a parser directly from body XML.
    pub fn from_xml(xml: impl Into<String>) -> Self {
        Self { body: xml.into() }
    }

    /// Raw body XML.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parse the body and return its paragraph text.
    pub fn parse(&self, options: &ExtractOptions) -> Result<ExtractedText> {
        parse_body(&self.body, options)
    }
}

/// Element kinds the walker cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordElement {
    Paragraph,
    Text,
    Other,
}

impl WordElement {
    fn classify(ns: &ResolveResult<'_>, local_name: &[u8]) -> Result<Self> {
        match ns {
            ResolveResult::Bound(Namespace(uri)) if *uri == WORDPROCESSING_NS.as_bytes() => {
                Ok(match local_name {
                    b"p" => WordElement::Paragraph,
                    b"t" => WordElement::Text,
                    _ => WordElement::Other,
                })
            }
            ResolveResult::Unknown(prefix) => Err(Error::XmlParse(format!(
                "unbound prefix: {}",
                String::from_utf8_lossy(prefix)
            ))),
            _ => Ok(WordElement::Other),
        }
    }
}

/// A `w:t` element being read.
#[derive(Debug)]
struct OpenRun {
    depth: usize,
    /// Cleared once a child element starts; only leading character data counts.
    collecting: bool,
}

/// Paragraph-collecting state over the event stream.
///
/// Paragraphs get a slot when their start tag is seen, so a paragraph nested
/// inside another one (text boxes) comes after its container. Run text is
/// appended to every open paragraph as it streams in, which keeps runs in
/// start-tag order even when one `w:t` sits inside another.
#[derive(Debug, Default)]
struct BodyWalker {
    slots: Vec<String>,
    open_paragraphs: Vec<(usize, usize)>,
    runs: Vec<OpenRun>,
    depth: usize,
    seen_root: bool,
}

impl BodyWalker {
    fn start(&mut self, element: WordElement, empty: bool) -> Result<()> {
        if self.depth == 0 {
            if self.seen_root {
                return Err(Error::XmlParse("junk after document element".to_string()));
            }
            self.seen_root = true;
        }
        if let Some(run) = self.runs.last_mut() {
            run.collecting = false;
        }
        if empty {
            // Self-closing paragraphs and runs carry no text.
            return Ok(());
        }

        self.depth += 1;
        match element {
            // The root element is never a paragraph of its own document.
            WordElement::Paragraph if self.depth > 1 => {
                self.open_paragraphs.push((self.slots.len(), self.depth));
                self.slots.push(String::new());
            }
            WordElement::Text => {
                self.runs.push(OpenRun {
                    depth: self.depth,
                    collecting: true,
                });
            }
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        if self.runs.last().is_some_and(|run| run.depth == self.depth) {
            self.runs.pop();
        }
        if self
            .open_paragraphs
            .last()
            .is_some_and(|&(_, depth)| depth == self.depth)
        {
            self.open_paragraphs.pop();
        }
        self.depth = self
            .depth
            .checked_sub(1)
            .ok_or_else(|| Error::XmlParse("unexpected end tag".to_string()))?;
        Ok(())
    }

    fn text(&mut self, content: &str) -> Result<()> {
        if self.runs.last().is_some_and(|run| run.collecting) {
            for &(slot, _) in &self.open_paragraphs {
                self.slots[slot].push_str(content);
            }
        } else if self.depth == 0 && !content.trim().is_empty() {
            return Err(Error::XmlParse("text outside the root element".to_string()));
        }
        Ok(())
    }

    fn finish(self, options: &ExtractOptions) -> Result<ExtractedText> {
        if !self.seen_root {
            return Err(Error::XmlParse("no element found".to_string()));
        }
        if self.depth > 0 {
            return Err(Error::XmlParse(format!(
                "{} unclosed element(s) at end of document",
                self.depth
            )));
        }

        let mut extracted = ExtractedText::new();
        for slot in self.slots {
            let paragraph = if options.normalize {
                slot.as_str().nfc().collect::<String>()
            } else {
                slot
            };
            if options.skip_whitespace_only && paragraph.trim().is_empty() {
                continue;
            }
            extracted.push(paragraph);
        }
        Ok(extracted)
    }
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

/// Whether `name` is a well-formed XML 1.0 name.
fn is_xml_name(name: &[u8]) -> bool {
    let Ok(name) = std::str::from_utf8(name) else {
        return false;
    };
    let mut chars = name.chars();
    chars.next().is_some_and(is_name_start_char) && chars.all(is_name_char)
}

/// Reject start tags with a bad element name or malformed attributes.
///
/// Attribute iteration runs with checks on, so duplicated, unquoted and
/// value-less attributes all surface as errors.
fn check_start_tag(e: &BytesStart<'_>) -> Result<()> {
    let name = e.name();
    if !is_xml_name(name.as_ref()) {
        return Err(Error::XmlParse(format!(
            "invalid element name: {}",
            String::from_utf8_lossy(name.as_ref())
        )));
    }
    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::XmlParse(err.to_string()))?;
        if !is_xml_name(attr.key.as_ref()) {
            return Err(Error::XmlParse(format!(
                "invalid attribute name: {}",
                String::from_utf8_lossy(attr.key.as_ref())
            )));
        }
    }
    Ok(())
}

/// Parse body XML into paragraph text.
///
/// Paragraph and run elements are matched by namespace URI, so any prefix
/// bound to [`WORDPROCESSING_NS`] works. Runs with no text are dropped and
/// paragraphs left empty produce no entry.
pub fn parse_body(xml: &str, options: &ExtractOptions) -> Result<ExtractedText> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut walker = BodyWalker::default();

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        match event {
            Event::Start(ref e) => {
                check_start_tag(e)?;
                let element = WordElement::classify(&ns, e.local_name().as_ref())?;
                walker.start(element, false)?;
            }
            Event::Empty(ref e) => {
                check_start_tag(e)?;
                let element = WordElement::classify(&ns, e.local_name().as_ref())?;
                walker.start(element, true)?;
            }
            Event::End(_) => walker.end()?,
            Event::Text(ref e) => {
                let content = e
                    .unescape()
                    .map_err(|err| Error::XmlParse(err.to_string()))?;
                walker.text(&content)?;
            }
            Event::CData(e) => {
                let bytes = e.into_inner();
                let content =
                    std::str::from_utf8(&bytes).map_err(|err| Error::Encoding(err.to_string()))?;
                walker.text(content)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let slots = walker.slots.len();
    let extracted = walker.finish(options)?;
    log::debug!(
        "parsed body: {} paragraphs, {} with text",
        slots,
        extracted.len()
    );
    Ok(extracted)
}
