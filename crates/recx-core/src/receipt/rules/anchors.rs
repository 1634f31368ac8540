//! Anchor tables: which label locates which canonical field.

use lazy_static::lazy_static;
use regex::Regex;

use super::FieldExtractor;
use crate::models::row::Field;

/// Summary cell labels in markup receipts, matched against the trimmed,
/// lowercased cell text. The value sits in the next sibling cell.
pub const SUMMARY_LABELS: &[(&str, Field)] = &[
    ("item bill", Field::ItemBill),
    ("handling fee", Field::HandlingFee),
    ("convenience fee", Field::ConvenienceFee),
    ("delivery partner fee", Field::DeliveryFee),
    ("grand total", Field::GrandTotal),
];

/// Monetary labels in text receipts.
pub const TEXT_AMOUNT_LABELS: &[(&str, Field)] = &[
    ("Platform fee", Field::OrderConvenienceFee),
    ("Delivery charge subtotal", Field::OrderDeliveryFee),
];

/// Fields text receipts never carry; always rendered empty.
pub const TEXT_ABSENT_FIELDS: &[Field] = &[Field::OrderCodFee, Field::OrderGiftWrappingFee];

/// Item fields text receipts never carry; always rendered empty.
pub const TEXT_ABSENT_ITEM_FIELDS: &[Field] = &[Field::ProductMrp, Field::ProductDiscount];

lazy_static! {
    /// Single-value labeled fields in text receipts.
    pub static ref TEXT_FIELD_RULES: Vec<LabeledField> = vec![
        LabeledField::new(Field::OrderId, r"Order ID:\s*(\d+)"),
        LabeledField::new(Field::CustomerName, r"Customer Name:\s*(.+)"),
        LabeledField::new(Field::DeliveryAddress, r"Delivery Address:\s*(.+)"),
        LabeledField::new(Field::RestaurantName, r"Restaurant Name:\s*(.+)"),
        LabeledField::new(Field::RestaurantAddress, r"(?s)Restaurant Address:\s*(.+?)\nDelivery partner")
            .flattened(),
        LabeledField::new(Field::DeliveryPartner, r"Delivery partner.*?:\s*(.+)"),
    ];
}

/// A field located by a labeled pattern whose first group is the value.
pub struct LabeledField {
    /// Canonical field populated by this rule.
    pub field: Field,
    pattern: Regex,
    flatten: bool,
}

impl LabeledField {
    /// Create a rule from a pattern literal.
    ///
    /// Panics on an invalid pattern; rules are compile-time constants.
    pub fn new(field: Field, pattern: &str) -> Self {
        Self {
            field,
            pattern: Regex::new(pattern).unwrap(),
            flatten: false,
        }
    }

    /// Join a multi-line value onto one line, each line break becoming a
    /// space. Other whitespace is kept.
    pub fn flattened(mut self) -> Self {
        self.flatten = true;
        self
    }

    fn clean(&self, value: &str) -> String {
        if self.flatten {
            value.replace('\n', " ").trim().to_string()
        } else {
            value.trim().to_string()
        }
    }
}

impl FieldExtractor for LabeledField {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| self.clean(m.as_str()))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| self.clean(m.as_str())))
            .collect()
    }
}
