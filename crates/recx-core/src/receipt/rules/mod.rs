//! Rule-based field extractors for receipts.
//!
//! Each rule is independent and testable against a text fragment; the
//! per-format anchor tables in [`anchors`] wire rules to canonical fields.

pub mod anchors;
pub mod amounts;
pub mod dates;
pub mod items;
pub mod patterns;

pub use anchors::{LabeledField, SUMMARY_LABELS, TEXT_AMOUNT_LABELS, TEXT_FIELD_RULES};
pub use amounts::{format_amount, sum_line_totals, CurrencyGlyphs, LabeledAmount};
pub use dates::{parse_iso_timestamp, parse_order_time, timestamp_fields};
pub use items::{LineItemExtractor, TextLineItem};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, left to right.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
