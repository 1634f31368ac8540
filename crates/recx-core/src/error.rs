//! Error types for the recx-core library.

use thiserror::Error;

/// Main error type for the recx library.
#[derive(Error, Debug)]
pub enum RecxError {
    /// Schema loading error.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// CSV output error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to loading the output schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A required header is absent after trimming and lowercasing.
    #[error("schema file must contain '{0}' column")]
    MissingColumn(&'static str),

    /// The workbook could not be opened or read.
    #[error("failed to read workbook: {0}")]
    Workbook(String),

    /// The workbook has no worksheets, or the sheet has no header row.
    #[error("schema file is empty")]
    Empty,

    /// The CSV schema file could not be parsed.
    #[error("failed to read CSV schema: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Result type for the recx library.
pub type Result<T> = std::result::Result<T, RecxError>;
