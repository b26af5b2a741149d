//! Parsing and validation for interactive input.

use chrono::NaiveDate;
use payroll_core::InvoiceStatus;
use payroll_store::paths::DATE_FORMAT;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a currency amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace and removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a currency amount.
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`). Empty or
/// whitespace-only input is treated as 0, matching a blank form field.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a date in the fixed `MM/DD/YYYY` calendar format.
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
}

/// Lenient Paid/Unpaid input: accepts `p`, `paid`, `u`, `unpaid` in any
/// case. The stored strings stay exactly `Paid` and `Unpaid`.
pub fn parse_status(s: &str) -> Option<InvoiceStatus> {
    match s.trim().to_lowercase().as_str() {
        "p" | "paid" => Some(InvoiceStatus::Paid),
        "u" | "unpaid" => Some(InvoiceStatus::Unpaid),
        _ => None,
    }
}

/// Yes/no prompt input; anything other than `y`/`yes` counts as no.
pub fn parse_yes(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
}
