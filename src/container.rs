//! ZIP package access for `.docx` files.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// Member holding the main document body.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Text encoding detected for an XML member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlEncoding {
    /// UTF-8, `bom` tells whether an EF BB BF prefix is present.
    Utf8 { bom: bool },
    /// UTF-16 little endian, `bom` tells whether an FF FE prefix is present.
    Utf16Le { bom: bool },
    /// UTF-16 big endian, `bom` tells whether an FE FF prefix is present.
    Utf16Be { bom: bool },
}

impl XmlEncoding {
    /// Guess the encoding from the leading bytes of a member.
    ///
    /// Without a byte order mark, UTF-16 is assumed only when the data is not
    /// valid UTF-8 and the first code units look like ASCII padded with zeros.
    pub fn detect(bytes: &[u8]) -> Self {
        match bytes {
            [0xEF, 0xBB, 0xBF, ..] => XmlEncoding::Utf8 { bom: true },
            [0xFF, 0xFE, ..] => XmlEncoding::Utf16Le { bom: true },
            [0xFE, 0xFF, ..] => XmlEncoding::Utf16Be { bom: true },
            _ if std::str::from_utf8(bytes).is_ok() => XmlEncoding::Utf8 { bom: false },
            [_, 0, _, 0, ..] => XmlEncoding::Utf16Le { bom: false },
            [0, _, 0, _, ..] => XmlEncoding::Utf16Be { bom: false },
            _ => XmlEncoding::Utf8 { bom: false },
        }
    }

    fn bom_len(&self) -> usize {
        match *self {
            XmlEncoding::Utf8 { bom: true } => 3,
            XmlEncoding::Utf16Le { bom: true } | XmlEncoding::Utf16Be { bom: true } => 2,
            _ => 0,
        }
    }
}

/// Decode XML member bytes into a UTF-8 string.
///
/// UTF-16 content gets its XML declaration rewritten to `UTF-8` so the XML
/// reader does not try to re-decode the already converted text.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    let encoding = XmlEncoding::detect(bytes);
    let body = &bytes[encoding.bom_len()..];

    match encoding {
        XmlEncoding::Utf8 { .. } => std::str::from_utf8(body)
            .map(str::to_string)
            .map_err(|e| Error::Encoding(e.to_string())),
        XmlEncoding::Utf16Le { .. } => {
            decode_utf16(body, u16::from_le_bytes).map(|s| declare_utf8(&s))
        }
        XmlEncoding::Utf16Be { .. } => {
            decode_utf16(body, u16::from_be_bytes).map(|s| declare_utf8(&s))
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Encoding(e.to_string()))
}

fn declare_utf8(content: &str) -> String {
    let Some(end) = content.strip_prefix("<?xml").and(content.find("?>")) else {
        return content.to_string();
    };
    let (decl, rest) = content.split_at(end + 2);
    let decl = ["\"UTF-16\"", "'UTF-16'", "\"utf-16\"", "'utf-16'"]
        .iter()
        .fold(decl.to_string(), |acc, quoted| {
            acc.replace(&format!("encoding={}", quoted), "encoding=\"UTF-8\"")
        });
    format!("{}{}", decl, rest)
}

/// A `.docx` package opened from disk or memory.
///
/// The archive is held in memory; dropping the container releases it.
pub struct DocxContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl DocxContainer {
    /// Open a package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docxtext::container::DocxContainer;
    ///
    /// let container = DocxContainer::open("report.docx")?;
    /// assert!(container.exists("word/document.xml"));
    /// # Ok::<(), docxtext::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let container = Self::from_reader(BufReader::new(file))?;
        log::debug!(
            "opened package {} ({} members)",
            path.display(),
            container.len()
        );
        Ok(container)
    }

    /// Create a container from an owned byte buffer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Create a container from any reader.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Read a member's raw bytes.
    pub fn read_binary(&self, name: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut member = archive.by_name(name).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => Error::MissingComponent(name.to_string()),
            other => Error::from(other),
        })?;
        // The header size is untrusted, so the buffer grows with the data read.
        let mut data = Vec::new();
        member.read_to_end(&mut data)?;
        log::debug!("read member {} ({} bytes)", name, data.len());
        Ok(data)
    }

    /// Read a member as XML text, decoding UTF-8 or UTF-16 content.
    pub fn read_xml(&self, name: &str) -> Result<String> {
        let bytes = self.read_binary(name)?;
        decode_xml_bytes(&bytes)
    }

    /// Check whether a member exists.
    pub fn exists(&self, name: &str) -> bool {
        self.archive.borrow().file_names().any(|n| n == name)
    }

    /// Number of members in the package.
    pub fn len(&self) -> usize {
        self.archive.borrow().len()
    }

    /// Whether the package has no members.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for DocxContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocxContainer")
            .field("files", &self.len())
            .finish()
    }
}

/// Read the document body of the package at `path`.
///
/// The container lives only for the duration of this call, so the archive is
/// released before the caller starts parsing.
pub fn read_document_body(path: impl AsRef<Path>) -> Result<String> {
    let container = DocxContainer::open(path)?;
    container.read_xml(DOCUMENT_PART)
}

/// Same as [`read_document_body`] for a package held in memory.
pub fn read_document_body_from_bytes(data: Vec<u8>) -> Result<String> {
    let container = DocxContainer::from_bytes(data)?;
    container.read_xml(DOCUMENT_PART)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn package(members: &[(&str, &str)]) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buffer));
        for (name, data) in members {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(data.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
        buffer
    }

    #[test]
    fn test_encoding_detection() {
        assert_eq!(
            XmlEncoding::detect(b"\xEF\xBB\xBF<a/>"),
            XmlEncoding::Utf8 { bom: true }
        );
        assert_eq!(
            XmlEncoding::detect(b"\xFF\xFE<\0"),
            XmlEncoding::Utf16Le { bom: true }
        );
        assert_eq!(
            XmlEncoding::detect(b"\xFE\xFF\0<"),
            XmlEncoding::Utf16Be { bom: true }
        );
        assert_eq!(XmlEncoding::detect(b"<a/>"), XmlEncoding::Utf8 { bom: false });
        assert_eq!(
            XmlEncoding::detect(b"<\0a\0\xFF\xD8"),
            XmlEncoding::Utf16Le { bom: false }
        );
    }

    #[test]
    fn test_decode_xml_bytes() {
        let utf16_le = b"\xFF\xFE<\0?\0x\0m\0l\0>\0";
        assert_eq!(decode_xml_bytes(utf16_le).unwrap(), "<?xml>");

        let utf16_be = b"\xFE\xFF\0<\0?\0x\0m\0l\0>";
        assert_eq!(decode_xml_bytes(utf16_be).unwrap(), "<?xml>");

        let utf8_bom = b"\xEF\xBB\xBF<?xml>";
        assert_eq!(decode_xml_bytes(utf8_bom).unwrap(), "<?xml>");

        assert_eq!(decode_xml_bytes(b"<?xml>").unwrap(), "<?xml>");
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let plain = b"<?xml version=\"1.0\"?><w:t>ab\xFFcd</w:t>";
        assert!(matches!(decode_xml_bytes(plain), Err(Error::Encoding(_))));

        let with_bom = b"\xEF\xBB\xBF<w:t>ab\xFFcd</w:t>";
        assert!(matches!(decode_xml_bytes(with_bom), Err(Error::Encoding(_))));
    }

    /// Overwrite the uncompressed size of every header for `name`.
    fn falsify_size(mut data: Vec<u8>, name: &str, size: u32) -> Vec<u8> {
        // (signature, offset of the size field, offset of the name length field)
        let headers: [([u8; 4], usize, usize); 2] = [
            ([0x50, 0x4B, 0x03, 0x04], 22, 26),
            ([0x50, 0x4B, 0x01, 0x02], 24, 28),
        ];
        let mut patched = 0;
        for (signature, size_at, name_len_at) in headers {
            let name_at = if signature[2] == 0x03 { 30 } else { 46 };
            let mut i = 0;
            while i + name_at <= data.len() {
                if data[i..i + 4] == signature {
                    let len = u16::from_le_bytes([data[i + name_len_at], data[i + name_len_at + 1]])
                        as usize;
                    if data.get(i + name_at..i + name_at + len) == Some(name.as_bytes()) {
                        data[i + size_at..i + size_at + 4].copy_from_slice(&size.to_le_bytes());
                        patched += 1;
                    }
                }
                i += 1;
            }
        }
        assert_eq!(patched, 2, "expected a local and a central header");
        data
    }

    #[test]
    fn test_falsified_member_size() {
        let xml = "<w:document/>";
        let mut buffer = Vec::new();
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        zip.start_file(DOCUMENT_PART, options).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();

        let data = falsify_size(buffer, DOCUMENT_PART, 0xFFFF_FFF0);
        match read_document_body_from_bytes(data) {
            Ok(body) => assert_eq!(body, xml),
            Err(err) => assert!(matches!(err, Error::ZipArchive(_) | Error::Io(_))),
        }
    }

    #[test]
    fn test_utf16_declaration_rewritten() {
        let xml = "<?xml version=\"1.0\" encoding=\"UTF-16\"?><a/>";
        let mut bytes = vec![0xFF, 0xFE];
        for unit in xml.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(
            decode_xml_bytes(&bytes).unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><a/>"
        );
    }

    #[test]
    fn test_read_member() {
        let data = package(&[(DOCUMENT_PART, "<w:document/>"), ("docProps/app.xml", "")]);
        let container = DocxContainer::from_bytes(data).unwrap();

        assert_eq!(container.len(), 2);
        assert!(container.exists(DOCUMENT_PART));
        assert!(!container.exists("word/styles.xml"));
        assert_eq!(container.read_xml(DOCUMENT_PART).unwrap(), "<w:document/>");
    }

    #[test]
    fn test_missing_member() {
        let data = package(&[("word/styles.xml", "<w:styles/>")]);
        let err = read_document_body_from_bytes(data).unwrap_err();
        assert!(matches!(err, Error::MissingComponent(ref name) if name == DOCUMENT_PART));
    }

    #[test]
    fn test_not_a_zip() {
        let err = DocxContainer::from_bytes(b"plain text, not a package".to_vec()).unwrap_err();
        assert!(matches!(err, Error::ZipArchive(_)));
    }

    #[test]
    fn test_open_missing_file() {
        let err = read_document_body("does/not/exist.docx").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
