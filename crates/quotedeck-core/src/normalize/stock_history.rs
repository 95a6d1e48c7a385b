use serde_json::{Map, Value};

use super::parse_numeric;
use crate::{Ohlc, SeriesPoint};

/// Known container keys, tried in order. Daily and 60-minute payloads come
/// from the history endpoint, 5-minute from TIME_SERIES_INTRADAY.
const SERIES_CONTAINERS: [&str; 3] = [
    "Time Series (Daily)",
    "Time Series (60min)",
    "Time Series (5min)",
];

const FIELD_OPEN: &str = "1. open";
const FIELD_HIGH: &str = "2. high";
const FIELD_LOW: &str = "3. low";
const FIELD_CLOSE: &str = "4. close";

/// Normalize an Alpha Vantage time-series payload into a chart series.
///
/// Returns an empty series when no known container is present. Rows with
/// any missing or non-numeric OHLC field are dropped whole. Output is
/// ascending by time regardless of upstream order.
pub fn normalize_stock_history(payload: &Value) -> Vec<SeriesPoint> {
    let Some(series) = SERIES_CONTAINERS
        .iter()
        .find_map(|container| payload.get(*container).and_then(Value::as_object))
    else {
        return Vec::new();
    };

    let mut points: Vec<SeriesPoint> = series.iter().filter_map(normalize_row).collect();
    points.sort_by(|a, b| a.time.cmp(&b.time));
    points
}

fn normalize_row((stamp, row): (&String, &Value)) -> Option<SeriesPoint> {
    let row = row.as_object()?;

    let open = field(row, FIELD_OPEN)?;
    let high = field(row, FIELD_HIGH)?;
    let low = field(row, FIELD_LOW)?;
    let close = field(row, FIELD_CLOSE)?;

    Some(SeriesPoint::new(stamp.clone(), close).with_ohlc(Ohlc {
        open,
        high,
        low,
        close,
    }))
}

fn field(row: &Map<String, Value>, name: &str) -> Option<f64> {
    row.get(name).and_then(parse_numeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn daily_payload() -> Value {
        json!({
            "Meta Data": {"2. Symbol": "AAPL"},
            "Time Series (Daily)": {
                "2024-01-03": {"1. open": "184.22", "2. high": "185.88", "3. low": "183.43", "4. close": "184.25"},
                "2024-01-02": {"1. open": "187.15", "2. high": "188.44", "3. low": "183.89", "4. close": "185.64"},
                "2024-01-01": {"1. open": "186.06", "2. high": "187.05", "3. low": "185.01", "4. close": "186.86"}
            }
        })
    }

    #[test]
    fn output_is_ascending_by_date() {
        let series = normalize_stock_history(&daily_payload());

        let dates: Vec<&str> = series.iter().map(|p| p.time.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn value_tracks_close() {
        let series = normalize_stock_history(&daily_payload());

        let first = &series[0];
        assert_eq!(first.value, 186.86);
        assert_eq!(first.ohlc.expect("candle").close, 186.86);
    }

    #[test]
    fn falls_back_to_sixty_minute_container() {
        let payload = json!({
            "Time Series (60min)": {
                "2024-01-02 16:00:00": {"1. open": "1", "2. high": "2", "3. low": "0.5", "4. close": "1.5"},
                "2024-01-02 15:00:00": {"1. open": "0.9", "2. high": "1.1", "3. low": "0.8", "4. close": "1.0"}
            }
        });

        let series = normalize_stock_history(&payload);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].time, "2024-01-02 15:00:00");
    }

    #[test]
    fn missing_container_yields_empty_series() {
        let payload = json!({"Note": "rate limited"});
        assert!(normalize_stock_history(&payload).is_empty());
    }

    #[test]
    fn row_with_non_numeric_field_is_dropped_whole() {
        let payload = json!({
            "Time Series (Daily)": {
                "2024-01-02": {"1. open": "187.15", "2. high": "188.44", "3. low": "183.89", "4. close": "oops"},
                "2024-01-01": {"1. open": "186.06", "2. high": "187.05", "3. low": "185.01", "4. close": "186.86"}
            }
        });

        let series = normalize_stock_history(&payload);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].time, "2024-01-01");
    }

    #[test]
    fn row_missing_a_field_is_dropped_whole() {
        let payload = json!({
            "Time Series (Daily)": {
                "2024-01-01": {"1. open": "186.06", "2. high": "187.05", "4. close": "186.86"}
            }
        });

        assert!(normalize_stock_history(&payload).is_empty());
    }
}
