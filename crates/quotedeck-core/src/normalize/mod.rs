//! Pure normalizers from provider-shaped payloads to canonical records.
//!
//! Every function here is total: no I/O, no panics, and malformed input
//! degrades to an error value or an empty/filtered output.

mod coins;
mod crypto_history;
mod quote;
mod stock_history;

pub use coins::normalize_ranked_coins;
pub use crypto_history::normalize_crypto_history;
pub use quote::{normalize_exchange_rate, normalize_global_quote};
pub use stock_history::normalize_stock_history;

use serde_json::Value;
use thiserror::Error;

/// Normalization failures surfaced to orchestrators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("no quote data in payload for '{symbol}'")]
    MissingQuote { symbol: String },
    #[error("no exchange rate data in payload for '{symbol}'")]
    MissingRate { symbol: String },
    #[error("field '{field}' is missing or non-numeric")]
    NonNumericField { field: &'static str },
    #[error(transparent)]
    Invalid(#[from] crate::ValidationError),
}

/// Providers serialize numbers inconsistently (JSON numbers or decimal
/// strings); accept both, reject anything non-finite.
pub(crate) fn parse_numeric(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    parsed.is_finite().then_some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_numbers_and_decimal_strings() {
        assert_eq!(parse_numeric(&json!(1.5)), Some(1.5));
        assert_eq!(parse_numeric(&json!("189.25")), Some(189.25));
        assert_eq!(parse_numeric(&json!(" 2.0 ")), Some(2.0));
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert_eq!(parse_numeric(&json!("n/a")), None);
        assert_eq!(parse_numeric(&json!(null)), None);
        assert_eq!(parse_numeric(&json!({"v": 1})), None);
        assert_eq!(parse_numeric(&json!("NaN")), None);
    }
}
