//! Provider adapters.
//!
//! Each adapter owns its endpoint construction and cache-key scheme and
//! funnels every request through the shared [`RequestCache`](crate::RequestCache).
//! Cache keys are derived from logical request identity, never from the
//! full URL, so equivalent requests collapse to one entry.

mod alpha_vantage;
mod coinranking;

pub use alpha_vantage::AlphaVantageAdapter;
pub use coinranking::CoinRankingAdapter;

use serde_json::Value;

use crate::SourceError;

/// Per-request timeout applied to every upstream call.
pub(crate) const UPSTREAM_TIMEOUT_MS: u64 = 5_000;

/// Proxy endpoints wrap upstream failures in `{"error": "..."}`; such a
/// payload means "no data for this key", never something to retry here.
pub(crate) fn check_error_envelope(payload: &Value) -> Result<(), SourceError> {
    if let Some(message) = payload.get("error").and_then(Value::as_str) {
        return Err(SourceError::unavailable(format!(
            "upstream error envelope: {message}"
        )));
    }
    Ok(())
}
