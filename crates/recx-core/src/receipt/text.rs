//! Text receipt extraction (text pulled from a paginated document).

use tracing::debug;

use super::rules::anchors::{TEXT_ABSENT_FIELDS, TEXT_ABSENT_ITEM_FIELDS};
use super::rules::{
    format_amount, parse_order_time, sum_line_totals, timestamp_fields, CurrencyGlyphs,
    FieldExtractor, LabeledAmount, LineItemExtractor, TEXT_AMOUNT_LABELS, TEXT_FIELD_RULES,
};
use super::{source_id, ReceiptExtractor};
use crate::models::config::ExtractionConfig;
use crate::models::row::{CanonicalRow, DocumentContext, Field};

/// Extractor for text receipts.
pub struct TextReceiptExtractor {
    vendor: String,
    amounts: Vec<(Field, LabeledAmount)>,
    items: LineItemExtractor,
}

impl TextReceiptExtractor {
    /// Create an extractor from the extraction settings.
    pub fn new(config: &ExtractionConfig) -> Self {
        let glyphs = CurrencyGlyphs::new(config.currency_glyphs.iter().cloned());
        let amounts = TEXT_AMOUNT_LABELS
            .iter()
            .map(|(label, field)| (*field, LabeledAmount::new(label, &glyphs)))
            .collect();

        Self {
            vendor: config.pdf.vendor.clone(),
            amounts,
            items: LineItemExtractor::new(&glyphs),
        }
    }

    fn document_context(&self, text: &str, filename: &str) -> DocumentContext {
        let labeled = TEXT_FIELD_RULES
            .iter()
            .map(|rule| (rule.field, rule.extract(text).unwrap_or_default()));
        let amounts = self
            .amounts
            .iter()
            .map(|(field, rule)| (*field, rule.extract(text).unwrap_or_default()));
        let absent = TEXT_ABSENT_FIELDS.iter().map(|field| (*field, String::new()));

        DocumentContext::new(source_id(filename), self.vendor.as_str())
            .with_all(labeled)
            .with_all(timestamp_fields(parse_order_time(text)))
            .with_all(amounts)
            .with_all(absent)
    }
}

impl Default for TextReceiptExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl ReceiptExtractor for TextReceiptExtractor {
    type Document = str;

    fn extract(&self, text: &str, filename: &str) -> Vec<CanonicalRow> {
        let items = self.items.extract_all(text);

        // Stamped on every row; empty when any line total is not a number
        let subtotal = sum_line_totals(items.iter().map(|item| item.total.as_str()))
            .map(format_amount)
            .unwrap_or_default();

        let context = self
            .document_context(text, filename)
            .with(Field::OrderSubtotal, subtotal);

        let rows: Vec<CanonicalRow> = items
            .into_iter()
            .map(|item| {
                TEXT_ABSENT_ITEM_FIELDS.iter().fold(
                    CanonicalRow::from_context(&context)
                        .with(Field::ProductName, item.name)
                        .with(Field::ProductQuantity, item.quantity)
                        .with(Field::ProductPrice, item.price)
                        .with(Field::ProductTotal, item.total),
                    |row, field| row.with(*field, ""),
                )
            })
            .collect();

        debug!("{}: {} line items", filename, rows.len());
        rows
    }
}
