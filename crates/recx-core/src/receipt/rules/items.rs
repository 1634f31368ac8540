//! Line items in text receipts: `name qty <glyph>price <glyph>total`.

use regex::Regex;

use super::amounts::CurrencyGlyphs;
use super::FieldExtractor;

/// One line item matched in receipt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLineItem {
    pub name: String,
    pub quantity: String,
    pub price: String,
    pub total: String,
}

/// Scans text for line items, left to right, non-overlapping.
pub struct LineItemExtractor {
    pattern: Regex,
}

impl LineItemExtractor {
    pub fn new(glyphs: &CurrencyGlyphs) -> Self {
        let pattern = format!(
            r"(.+?)\s+(\d+)\s+{glyph}(\d+)\s+{glyph}(\d+)",
            glyph = glyphs.pattern()
        );
        Self {
            // Glyph fragment is built from escaped literals
            pattern: Regex::new(&pattern).unwrap(),
        }
    }
}

impl FieldExtractor for LineItemExtractor {
    type Output = TextLineItem;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.pattern
            .captures_iter(text)
            .map(|caps| TextLineItem {
                name: caps[1].trim().to_string(),
                quantity: caps[2].to_string(),
                price: caps[3].to_string(),
                total: caps[4].to_string(),
            })
            .collect()
    }
}
