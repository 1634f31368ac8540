//! Monetary values: currency glyph handling, labeled amounts and subtotals.

use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;

use super::FieldExtractor;

/// The set of currency symbols stripped from values and accepted in front
/// of amounts.
#[derive(Debug, Clone, Default)]
pub struct CurrencyGlyphs {
    glyphs: Vec<String>,
}

impl CurrencyGlyphs {
    /// Build the set, ignoring empty entries.
    pub fn new<I, S>(glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut glyphs: Vec<String> = glyphs
            .into_iter()
            .map(Into::into)
            .filter(|g| !g.is_empty())
            .collect();
        // Longest first so a glyph that contains another is tried first
        glyphs.sort_by(|a, b| b.len().cmp(&a.len()));
        glyphs.dedup();
        Self { glyphs }
    }

    /// Remove every glyph occurrence and trim the result.
    pub fn strip(&self, value: &str) -> String {
        let mut value = value.to_string();
        for glyph in &self.glyphs {
            value = value.replace(glyph.as_str(), "");
        }
        value.trim().to_string()
    }

    /// Regex fragment matching exactly one glyph.
    ///
    /// With no glyphs configured this matches the empty string, so amounts
    /// are accepted bare.
    pub fn pattern(&self) -> String {
        let alternatives: Vec<String> = self.glyphs.iter().map(|g| regex::escape(g)).collect();
        format!("(?:{})", alternatives.join("|"))
    }
}

/// An amount located by a literal label, optionally followed by a
/// parenthesized glyph and a glyph, then a decimal number.
pub struct LabeledAmount {
    pattern: Regex,
}

impl LabeledAmount {
    pub fn new(label: &str, glyphs: &CurrencyGlyphs) -> Self {
        let glyph = glyphs.pattern();
        let pattern = format!(
            r"{}\s*(?:\({glyph})?{glyph}?([\d.]+)",
            regex::escape(label),
            glyph = glyph
        );
        Self {
            // Label is escaped and the glyph fragment is built from escaped literals
            pattern: Regex::new(&pattern).unwrap(),
        }
    }
}

impl FieldExtractor for LabeledAmount {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.pattern
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.pattern
            .captures_iter(text)
            .map(|caps| caps[1].trim().to_string())
            .collect()
    }
}

/// Sum line totals; `None` if any of them is not a number or the sum
/// overflows.
pub fn sum_line_totals<'a, I>(totals: I) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a str>,
{
    totals.into_iter().try_fold(Decimal::ZERO, |acc, total| {
        acc.checked_add(Decimal::from_str(total.trim()).ok()?)
    })
}

/// Format an amount with two decimal places.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}
