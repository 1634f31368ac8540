//! PDF processing module.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text sources.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF in one pass.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;

    /// Extract every page and concatenate, each page followed by a newline.
    fn extract_pages_text(&self) -> Result<String> {
        let mut text = String::new();
        for page in 1..=self.page_count() {
            text.push_str(&self.extract_page_text(page)?);
            text.push('\n');
        }
        Ok(text)
    }
}

#[cfg(test)]
pub(crate) use extractor::fixtures;
