//! Order timestamps.

use chrono::{Datelike, NaiveDateTime};

use super::patterns::ORDER_TIME;
use crate::models::row::Field;

/// Order time layout in text receipts, e.g. `5 June 2025, 7:45 PM`.
pub const ORDER_TIME_FORMAT: &str = "%d %B %Y, %I:%M %p";

/// ISO-8601 layout written to the timestamp field.
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Find and parse the labeled order time in receipt text.
pub fn parse_order_time(text: &str) -> Option<NaiveDateTime> {
    let caps = ORDER_TIME.captures(text)?;
    let ts = NaiveDateTime::parse_from_str(&caps[1], ORDER_TIME_FORMAT).ok()?;
    // chrono's %B also takes abbreviations; only full month names count.
    let month = caps[1].split_whitespace().nth(1)?;
    month
        .eq_ignore_ascii_case(&ts.format("%B").to_string())
        .then_some(ts)
}

/// Parse an ISO-8601 timestamp without offset.
pub fn parse_iso_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), ISO_FORMAT).ok()
}

/// Timestamp, year, month and day fields. All four are empty when no
/// timestamp is available.
pub fn timestamp_fields(timestamp: Option<NaiveDateTime>) -> [(Field, String); 4] {
    match timestamp {
        Some(ts) => [
            (Field::EmailTimestamp, ts.format(ISO_FORMAT).to_string()),
            (Field::Year, ts.year().to_string()),
            (Field::Month, ts.month().to_string()),
            (Field::Day, ts.day().to_string()),
        ],
        None => [
            (Field::EmailTimestamp, String::new()),
            (Field::Year, String::new()),
            (Field::Month, String::new()),
            (Field::Day, String::new()),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_order_time() {
        let text = "Order ID: 1\nOrder Time: 5 June 2025, 7:45 PM\n";
        let expected = NaiveDate::from_ymd_opt(2025, 6, 5)
            .unwrap()
            .and_hms_opt(19, 45, 0)
            .unwrap();
        assert_eq!(parse_order_time(text), Some(expected));
    }

    #[test]
    fn test_parse_order_time_morning() {
        let text = "Order Time: 23 January 2024, 12:05 am";
        let ts = parse_order_time(text).unwrap();
        assert_eq!(ts.format(ISO_FORMAT).to_string(), "2024-01-23T00:05:00");
    }

    #[test]
    fn test_unparseable_order_time() {
        assert_eq!(parse_order_time("Order Time: 31 Smarch 2025, 7:45 PM"), None);
        assert_eq!(parse_order_time("Order Time: 31 February 2025, 7:45 PM"), None);
        assert_eq!(parse_order_time("no time here"), None);
    }

    #[test]
    fn test_abbreviated_month_rejected() {
        assert_eq!(parse_order_time("Order Time: 5 Jun 2025, 7:45 PM"), None);
        assert_eq!(parse_order_time("Order Time: 5 Sep 2025, 7:45 PM"), None);
        assert!(parse_order_time("Order Time: 5 september 2025, 7:45 PM").is_some());
    }

    #[test]
    fn test_timestamp_fields() {
        let ts = parse_iso_timestamp("2025-06-25T10:00:00");
        let fields = timestamp_fields(ts);
        assert_eq!(fields[0], (Field::EmailTimestamp, "2025-06-25T10:00:00".to_string()));
        assert_eq!(fields[1], (Field::Year, "2025".to_string()));
        assert_eq!(fields[2], (Field::Month, "6".to_string()));
        assert_eq!(fields[3], (Field::Day, "25".to_string()));
    }

    #[test]
    fn test_missing_timestamp_clears_all_fields() {
        for (_, value) in timestamp_fields(None) {
            assert!(value.is_empty());
        }
    }
}
