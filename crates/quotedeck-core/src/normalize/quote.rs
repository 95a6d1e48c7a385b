use serde_json::{Map, Value};

use super::{parse_numeric, NormalizeError};
use crate::{Instrument, SnapshotRecord, UtcDateTime};

const QUOTE_CONTAINER: &str = "Global Quote";
const RATE_CONTAINER: &str = "Realtime Currency Exchange Rate";

const FIELD_PRICE: &str = "05. price";
const FIELD_CHANGE: &str = "09. change";
const FIELD_PERCENT: &str = "10. change percent";
const FIELD_RATE: &str = "5. Exchange Rate";

/// Normalize a GLOBAL_QUOTE payload into a snapshot record.
///
/// Alpha Vantage answers unknown symbols with an empty `"Global Quote"`
/// object, which counts as missing.
pub fn normalize_global_quote(
    instrument: &Instrument,
    payload: &Value,
) -> Result<SnapshotRecord, NormalizeError> {
    let quote = payload
        .get(QUOTE_CONTAINER)
        .and_then(Value::as_object)
        .filter(|container| !container.is_empty())
        .ok_or_else(|| NormalizeError::MissingQuote {
            symbol: instrument.symbol.to_string(),
        })?;

    let price = numeric_field(quote, FIELD_PRICE)?;
    let change = numeric_field(quote, FIELD_CHANGE)?;
    let percent = quote
        .get(FIELD_PERCENT)
        .and_then(Value::as_str)
        .ok_or(NormalizeError::NonNumericField {
            field: FIELD_PERCENT,
        })?;

    let record = SnapshotRecord::new(
        instrument.symbol.clone(),
        instrument.name.clone(),
        instrument.kind,
        price,
        change,
        percent,
        UtcDateTime::now(),
    )?;

    Ok(record)
}

/// Normalize a CURRENCY_EXCHANGE_RATE payload into a snapshot record.
///
/// The rate endpoint carries no change information; records come out
/// neutral with a zero change, as the dashboard has always shown them.
pub fn normalize_exchange_rate(
    instrument: &Instrument,
    payload: &Value,
) -> Result<SnapshotRecord, NormalizeError> {
    let rate = payload
        .get(RATE_CONTAINER)
        .and_then(Value::as_object)
        .filter(|container| !container.is_empty())
        .ok_or_else(|| NormalizeError::MissingRate {
            symbol: instrument.symbol.to_string(),
        })?;

    let price = numeric_field(rate, FIELD_RATE)?;

    let record = SnapshotRecord::new(
        instrument.symbol.clone(),
        instrument.name.clone(),
        instrument.kind,
        price,
        0.0,
        "0%",
        UtcDateTime::now(),
    )?;

    Ok(record)
}

fn numeric_field(container: &Map<String, Value>, field: &'static str) -> Result<f64, NormalizeError> {
    container
        .get(field)
        .and_then(parse_numeric)
        .ok_or(NormalizeError::NonNumericField { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChangeDirection, InstrumentKind, Symbol};
    use serde_json::json;

    fn stock(symbol: &str) -> Instrument {
        Instrument::new(
            Symbol::parse(symbol).expect("symbol"),
            "Test Stock",
            InstrumentKind::Stock,
        )
    }

    #[test]
    fn normalizes_global_quote() {
        let payload = json!({
            "Global Quote": {
                "01. symbol": "AAPL",
                "05. price": "189.9500",
                "09. change": "-1.2500",
                "10. change percent": "-0.6537%"
            }
        });

        let record = normalize_global_quote(&stock("AAPL"), &payload).expect("record");

        assert_eq!(record.price, 189.95);
        assert_eq!(record.change, -1.25);
        assert_eq!(record.percent, "-0.6537%");
        assert_eq!(record.direction, ChangeDirection::Down);
    }

    #[test]
    fn empty_quote_container_counts_as_missing() {
        let payload = json!({"Global Quote": {}});

        let err = normalize_global_quote(&stock("ZZZZ"), &payload).expect_err("must fail");
        assert!(matches!(err, NormalizeError::MissingQuote { .. }));
    }

    #[test]
    fn absent_quote_container_counts_as_missing() {
        let err = normalize_global_quote(&stock("AAPL"), &json!({})).expect_err("must fail");
        assert!(matches!(err, NormalizeError::MissingQuote { .. }));
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let payload = json!({
            "Global Quote": {
                "05. price": "not-a-number",
                "09. change": "0.5",
                "10. change percent": "0.3%"
            }
        });

        let err = normalize_global_quote(&stock("AAPL"), &payload).expect_err("must fail");
        assert!(matches!(err, NormalizeError::NonNumericField { .. }));
    }

    #[test]
    fn normalizes_exchange_rate_as_neutral() {
        let instrument = Instrument::new(
            Symbol::parse("EUR/USD").expect("pair"),
            "Euro/US Dollar",
            InstrumentKind::Forex,
        );
        let payload = json!({
            "Realtime Currency Exchange Rate": {
                "1. From_Currency Code": "EUR",
                "3. To_Currency Code": "USD",
                "5. Exchange Rate": "1.08430000"
            }
        });

        let record = normalize_exchange_rate(&instrument, &payload).expect("record");

        assert_eq!(record.price, 1.0843);
        assert_eq!(record.change, 0.0);
        assert_eq!(record.percent, "0%");
        assert_eq!(record.direction, ChangeDirection::Neutral);
    }

    #[test]
    fn missing_rate_container_is_typed() {
        let instrument = Instrument::new(
            Symbol::parse("EUR/USD").expect("pair"),
            "Euro/US Dollar",
            InstrumentKind::Forex,
        );

        let err = normalize_exchange_rate(&instrument, &json!({})).expect_err("must fail");
        assert!(matches!(err, NormalizeError::MissingRate { .. }));
    }
}
