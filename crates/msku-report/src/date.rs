//! Order date parsing.

use chrono::{NaiveDate, NaiveDateTime};

/// Try to parse an order date in the layouts sales exports commonly use.
pub fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let date_formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y", // US: 01/15/2024
    ];
    for fmt in &date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ];
    for fmt in &datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }

    None
}
