use serde::{Deserialize, Serialize};

/// One candle's open/high/low/close values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// One point of a chart series, oldest-first within a series.
///
/// `time` stays a string label: Alpha Vantage keys series by bare dates or
/// naive datetimes, CoinRanking by epoch seconds (converted to RFC3339), and
/// chart renderers consume the label verbatim. Within one series the format
/// is uniform, so lexicographic order is chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ohlc: Option<Ohlc>,
}

impl SeriesPoint {
    pub fn new(time: impl Into<String>, value: f64) -> Self {
        Self {
            time: time.into(),
            value,
            ohlc: None,
        }
    }

    pub fn with_ohlc(mut self, ohlc: Ohlc) -> Self {
        self.ohlc = Some(ohlc);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_point_with_candle() {
        let point = SeriesPoint::new("2024-01-01", 101.0).with_ohlc(Ohlc {
            open: 100.0,
            high: 102.0,
            low: 99.5,
            close: 101.0,
        });

        assert_eq!(point.value, 101.0);
        assert_eq!(point.ohlc.expect("candle").open, 100.0);
    }
}
