//! PDF text extraction using lopdf and pdf-extract.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, trace};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor using lopdf for per-page text and pdf-extract for
/// whole-document text.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    fallback_full_text: bool,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            fallback_full_text: true,
        }
    }

    /// Set whether blank per-page text falls back to whole-document text.
    pub fn with_fallback_full_text(mut self, fallback: bool) -> Self {
        self.fallback_full_text = fallback;
        self
    }

    /// Read and load a PDF file.
    pub fn open(mut self, path: &Path) -> crate::Result<Self> {
        let data = std::fs::read(path)?;
        self.load(&data)?;
        Ok(self)
    }

    /// Text of all pages, each followed by a newline.
    ///
    /// When every page comes back blank and the fallback is enabled, the
    /// whole document is extracted with pdf-extract instead.
    pub fn receipt_text(&self) -> Result<String> {
        let text = self.extract_pages_text()?;
        if !self.fallback_full_text || !text.trim().is_empty() {
            return Ok(text);
        }

        debug!("Per-page text is blank, falling back to full-document extraction");
        let mut text = self.extract_text()?;
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))?;

        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }

        let text = doc
            .extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        trace!("Page {}: {} chars", page, text.len());
        Ok(text)
    }
}

/// In-memory PDF fixtures for tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Build a PDF with one page per entry, each line in its own text block.
    pub(crate) fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for lines in pages {
            let mut operations = Vec::new();
            for (i, line) in lines.iter().enumerate() {
                let y = 760 - 20 * i as i64;
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
                operations.push(Operation::new("Td", vec![72.into(), y.into()]));
                operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
                operations.push(Operation::new("ET", vec![]));
            }

            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut data = Vec::new();
        doc.save_to(&mut data).unwrap();
        data
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::build_pdf;
    use super::*;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        let err = extractor.load(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn test_extract_page_text_requires_document() {
        let extractor = PdfExtractor::new();
        assert!(extractor.extract_page_text(1).is_err());
    }

    #[test]
    fn test_pages_are_concatenated_in_order() {
        let data = build_pdf(&[&["Order ID: 5551234"], &["Customer Name: Asha"]]);

        let mut extractor = PdfExtractor::new();
        extractor.load(&data).unwrap();
        assert_eq!(extractor.page_count(), 2);

        let text = extractor.receipt_text().unwrap();
        let order = text.find("Order ID: 5551234").unwrap();
        let customer = text.find("Customer Name: Asha").unwrap();
        assert!(order < customer);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_invalid_page() {
        let data = build_pdf(&[&["only page"]]);

        let mut extractor = PdfExtractor::new();
        extractor.load(&data).unwrap();

        assert!(matches!(
            extractor.extract_page_text(3),
            Err(PdfError::InvalidPage(3))
        ));
    }
}
