//! Receipt field extraction module.

mod html;
pub mod rules;
mod text;

pub use html::{parse_html, HtmlReceiptExtractor};
pub use text::TextReceiptExtractor;

use std::path::Path;

use crate::models::row::CanonicalRow;

/// Trait for per-format receipt extractors.
///
/// Extraction is best-effort: an anchor that is not found leaves its field
/// unset or empty and never fails the document.
pub trait ReceiptExtractor {
    /// Parsed form of the document this extractor reads.
    type Document: ?Sized;

    /// Produce one row per detected line item.
    fn extract(&self, document: &Self::Document, filename: &str) -> Vec<CanonicalRow>;
}

/// Supported receipt formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptKind {
    /// Markup (HTML) email receipt.
    Html,
    /// Paginated (PDF) receipt read as text.
    Pdf,
}

impl ReceiptKind {
    /// Case-insensitive extension dispatch; other extensions are `None`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "html" => Some(Self::Html),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Source id of a document: the file name minus its extension.
pub fn source_id(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_kind_from_path() {
        assert_eq!(ReceiptKind::from_path(Path::new("a/order1.html")), Some(ReceiptKind::Html));
        assert_eq!(ReceiptKind::from_path(Path::new("ORDER1.HTML")), Some(ReceiptKind::Html));
        assert_eq!(ReceiptKind::from_path(Path::new("rcpt.Pdf")), Some(ReceiptKind::Pdf));
        assert_eq!(ReceiptKind::from_path(Path::new("notes.htm")), None);
        assert_eq!(ReceiptKind::from_path(Path::new("schema.xlsx")), None);
        assert_eq!(ReceiptKind::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_source_id() {
        assert_eq!(source_id("order1.html"), "order1");
        assert_eq!(source_id("rcpt.PDF"), "rcpt");
        assert_eq!(source_id("zomato.order.42.pdf"), "zomato.order.42");
        assert_eq!(source_id("plain"), "plain");
    }
}
