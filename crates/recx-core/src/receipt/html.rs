//! Markup receipt extraction.
//!
//! Fields are found by text anchors inside table cells: a label cell is
//! followed by its value cell, and line items are cells that start with a
//! `<qty> x ` prefix followed by a price cell.

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, trace};

use super::rules::patterns::{
    ORDER_ID_TEXT, ORDER_ID_VALUE, QUANTITY_NAME, QUANTITY_PREFIX, STREET_SUFFIX,
};
use super::rules::{parse_iso_timestamp, timestamp_fields, CurrencyGlyphs, SUMMARY_LABELS};
use super::{source_id, ReceiptExtractor};
use crate::error::RecxError;
use crate::models::config::ExtractionConfig;
use crate::models::row::{CanonicalRow, DocumentContext, Field};

lazy_static! {
    static ref TD: Selector = Selector::parse("td").unwrap();
}

/// Parse a markup document.
pub fn parse_html(source: &str) -> Html {
    Html::parse_document(source)
}

/// Extractor for markup receipts.
pub struct HtmlReceiptExtractor {
    vendor: String,
    timestamp: NaiveDateTime,
    glyphs: CurrencyGlyphs,
}

impl HtmlReceiptExtractor {
    /// Create an extractor from the extraction settings.
    pub fn new(config: &ExtractionConfig) -> crate::Result<Self> {
        let timestamp = parse_iso_timestamp(&config.html.placeholder_timestamp).ok_or_else(|| {
            RecxError::Config(format!(
                "invalid html placeholder timestamp: {}",
                config.html.placeholder_timestamp
            ))
        })?;

        Ok(Self {
            vendor: config.html.vendor.clone(),
            timestamp,
            glyphs: CurrencyGlyphs::new(config.currency_glyphs.iter().cloned()),
        })
    }

    fn document_context(&self, document: &Html, filename: &str) -> DocumentContext {
        let context = DocumentContext::new(source_id(filename), self.vendor.as_str())
            .with_all(timestamp_fields(Some(self.timestamp)))
            .with_opt(Field::TransactionId, find_order_id(document))
            .with_opt(Field::Address, find_address(document));

        self.summary_fields(document)
            .into_iter()
            .fold(context, |ctx, (field, value)| ctx.with(field, value))
    }

    /// Label/value pairs in document order; later labels overwrite earlier.
    fn summary_fields(&self, document: &Html) -> Vec<(Field, String)> {
        document
            .select(&TD)
            .filter(|td| single_string(*td).is_some())
            .filter_map(|td| {
                let label = stripped_text(td).to_lowercase();
                let (_, field) = SUMMARY_LABELS.iter().find(|(l, _)| *l == label)?;
                let value = next_cell(td)?;
                trace!("Summary label '{}' -> {}", label, field);
                Some((*field, self.glyphs.strip(&stripped_text(value))))
            })
            .collect()
    }
}

impl ReceiptExtractor for HtmlReceiptExtractor {
    type Document = Html;

    fn extract(&self, document: &Html, filename: &str) -> Vec<CanonicalRow> {
        let context = self.document_context(document, filename);

        let rows: Vec<CanonicalRow> = document
            .select(&TD)
            .filter(|td| single_string(*td).is_some_and(|s| QUANTITY_PREFIX.is_match(s)))
            .filter_map(|td| {
                let text = stripped_text(td);
                let caps = QUANTITY_NAME.captures(&text)?;
                let Some(price) = next_cell(td) else {
                    trace!("Line item '{}' has no price cell", text);
                    return None;
                };

                Some(
                    CanonicalRow::from_context(&context)
                        .with(Field::ProductSequence, &caps[1])
                        .with(Field::ProductName, &caps[2])
                        .with(Field::ProductPrice, self.glyphs.strip(&stripped_text(price))),
                )
            })
            .collect();

        debug!("{}: {} line items", filename, rows.len());
        rows
    }
}

/// Order id from the first text node mentioning it.
fn find_order_id(document: &Html) -> Option<String> {
    let text = document
        .root_element()
        .text()
        .find(|text| ORDER_ID_TEXT.is_match(text))?;
    ORDER_ID_VALUE.captures(text).map(|caps| caps[1].to_string())
}

/// Delivery address from the first cell that looks like a street line.
fn find_address(document: &Html) -> Option<String> {
    document
        .select(&TD)
        .find(|td| single_string(*td).is_some_and(|s| STREET_SUFFIX.is_match(s)))
        .map(stripped_text)
}

/// The element's only string, descending through single-child elements.
/// `None` when the element has zero or several children.
fn single_string(element: ElementRef<'_>) -> Option<&str> {
    let mut children = element.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }

    match only.value() {
        Node::Text(text) => Some(&**text),
        Node::Element(_) => ElementRef::wrap(only).and_then(single_string),
        _ => None,
    }
}

/// All text of an element with each piece trimmed.
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// The next sibling `td` of a cell.
fn next_cell(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "td")
}
