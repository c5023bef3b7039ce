use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a declared amount into a Decimal.
///
/// Handles formats like:
/// - "2500.00" -> 2500.00
/// - "2500,00" -> 2500.00 (French decimal comma)
/// - "  1834.5 " -> 1834.5
///
/// Returns None for anything else; the caller drops the line.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let normalized = s.replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// Parse a declared `DDMMYYYY` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%d%m%Y").ok()
}

/// Render a date back into the declared `DDMMYYYY` form.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d%m%Y").to_string()
}
