//! Finding-aid detection.
//!
//! Detection is deliberately shallow: a substring sniff for the EAD root element
//! or header. Documents that pass but carry no target tags simply yield no text.

use crate::constants::extraction::{EAD_HEADER_MARKER, EAD_ROOT_MARKER, UTF8_BOM};
use crate::errors::ArchiveError;
use crate::types::DocumentId;

/// Raw document bytes plus the identifier supplied by its source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDocument {
    /// Source identifier (usually the file path).
    pub id: DocumentId,
    /// Undecoded document content.
    pub bytes: Vec<u8>,
}

impl RawDocument {
    /// Wrap bytes read by an acquisition collaborator.
    pub fn new(id: impl Into<DocumentId>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            bytes: bytes.into(),
        }
    }
}

/// Decode document bytes as UTF-8, stripping a leading byte-order mark.
///
/// Any other encoding (UTF-16 exports are common) yields
/// [`ArchiveError::WrongEncoding`], which callers treat as a skip.
pub fn decode_document(document: &RawDocument) -> Result<String, ArchiveError> {
    let bytes = document
        .bytes
        .strip_prefix(UTF8_BOM)
        .unwrap_or(&document.bytes);
    String::from_utf8(bytes.to_vec()).map_err(|_| ArchiveError::WrongEncoding {
        document: document.id.clone(),
    })
}

/// True if the text carries the EAD root-element opening or the EAD header marker.
pub fn classify(content: &str) -> bool {
    content.contains(EAD_ROOT_MARKER) || content.contains(EAD_HEADER_MARKER)
}

/// Decode and classify in one step, returning the text of a validated finding aid.
pub fn validate_document(document: &RawDocument) -> Result<String, ArchiveError> {
    let content = decode_document(document)?;
    if !classify(&content) {
        return Err(ArchiveError::NotFindingAid {
            document: document.id.clone(),
        });
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_accepts_root_or_header_marker() {
        assert!(classify(r#"<ead xmlns="urn:isbn:1-931666-22-9"><eadheader/></ead>"#));
        assert!(classify("<ead audience=\"external\">"));
        assert!(classify("<eadheader langencoding=\"iso639-2b\">"));
    }

    #[test]
    fn classify_rejects_other_xml() {
        assert!(!classify("<mods><titleInfo/></mods>"));
        assert!(!classify("<ead>no attributes on the root</ead>"));
        assert!(!classify(""));
    }

    #[test]
    fn decode_document_reports_wrong_encoding() {
        // UTF-16LE "<e" with a BOM
        let doc = RawDocument::new("utf16.xml", vec![0xFF, 0xFE, b'<', 0x00, b'e', 0x00]);
        let err = decode_document(&doc).unwrap_err();
        assert!(matches!(err, ArchiveError::WrongEncoding { ref document } if document == "utf16.xml"));
        assert!(err.is_skippable());
    }

    #[test]
    fn decode_document_strips_utf8_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"<ead id=\"x\"/>");
        let doc = RawDocument::new("bom.xml", bytes);
        assert_eq!(decode_document(&doc).unwrap(), "<ead id=\"x\"/>");
    }

    #[test]
    fn validate_document_flags_non_finding_aids() {
        let doc = RawDocument::new("mods.xml", b"<mods/>".to_vec());
        let err = validate_document(&doc).unwrap_err();
        assert!(matches!(err, ArchiveError::NotFindingAid { .. }));

        let doc = RawDocument::new("ead.xml", b"<ead id=\"x\"><eadheader/></ead>".to_vec());
        assert!(validate_document(&doc).is_ok());
    }
}
