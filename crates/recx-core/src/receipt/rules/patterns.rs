//! Fixed regex anchors for receipt extraction.
//!
//! Patterns that depend on the configured currency glyphs are built at
//! runtime in [`super::amounts`] and [`super::items`].

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Markup receipts
    pub static ref ORDER_ID_TEXT: Regex = Regex::new(r"(?i)order id").unwrap();

    pub static ref ORDER_ID_VALUE: Regex = Regex::new(r"(?i)order id:\s*(\d+)").unwrap();

    pub static ref STREET_SUFFIX: Regex = Regex::new(r"(?i)Rd,").unwrap();

    pub static ref QUANTITY_PREFIX: Regex = Regex::new(r"(?i)^\d+ x ").unwrap();

    pub static ref QUANTITY_NAME: Regex = Regex::new(r"^(\d+)\s*x\s*(.+)").unwrap();

    // Text receipts
    pub static ref ORDER_TIME: Regex = Regex::new(
        r"Order Time:\s*(\d{1,2} \w+ \d{4}, \d{1,2}:\d{2} [APMapm]{2})"
    ).unwrap();
}
