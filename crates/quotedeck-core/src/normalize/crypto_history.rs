use serde_json::Value;

use super::parse_numeric;
use crate::{Ohlc, SeriesPoint, UtcDateTime};

/// Normalize a CoinRanking price history into synthesized candles.
///
/// The feed is a flat sequence of `{price, timestamp}` snapshots, newest
/// first, with no true intraday OHLC. After reordering oldest-first, each
/// candle closes at its own price and opens at the previous close (the
/// first candle opens at itself), so the body spans the previous and
/// current snapshot: `high = max(open, close)`, `low = min(open, close)`.
pub fn normalize_crypto_history(payload: &Value) -> Vec<SeriesPoint> {
    let Some(history) = payload
        .pointer("/data/history")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    let closes: Vec<(String, f64)> = history
        .iter()
        .rev()
        .filter_map(|point| {
            let price = point.get("price").and_then(parse_numeric)?;
            let seconds = point.get("timestamp").and_then(Value::as_i64)?;
            let time = UtcDateTime::from_unix_timestamp(seconds).ok()?.format_rfc3339();
            Some((time, price))
        })
        .collect();

    let mut points = Vec::with_capacity(closes.len());
    let mut previous_close: Option<f64> = None;

    for (time, close) in closes {
        let open = previous_close.unwrap_or(close);
        points.push(SeriesPoint::new(time, close).with_ohlc(Ohlc {
            open,
            high: open.max(close),
            low: open.min(close),
            close,
        }));
        previous_close = Some(close);
    }

    points
}
