//! Core library for receipt extraction.
//!
//! This crate provides:
//! - Schema loading from a spreadsheet of column names and nominal types
//! - PDF text extraction (per page, with a whole-document fallback)
//! - Rule-based field extraction for markup (HTML) and text (PDF) receipts
//! - Projection of canonical rows onto the schema and CSV output
//! - A sequential pipeline tying the pieces together over a directory

pub mod error;
pub mod models;
pub mod schema;
pub mod pdf;
pub mod receipt;
pub mod output;
pub mod pipeline;

pub use error::{RecxError, Result};
pub use models::row::{CanonicalRow, DocumentContext, Field};
pub use models::schema::{Schema, SchemaEntry};
pub use models::config::RecxConfig;
pub use schema::load_schema;
pub use pdf::{PdfExtractor, PdfProcessor};
pub use receipt::{HtmlReceiptExtractor, ReceiptExtractor, ReceiptKind, TextReceiptExtractor};
pub use output::RowWriter;
pub use pipeline::{Pipeline, RunSummary};
