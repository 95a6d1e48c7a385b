use serde_json::Value;

use super::parse_numeric;
use crate::{InstrumentKind, SnapshotRecord, Symbol, UtcDateTime};

/// Normalize a CoinRanking bulk payload into a pool of snapshot records.
///
/// One ranked payload covers every crypto instrument of a dashboard pass;
/// the aggregator matches requested symbols against this pool. Coins with
/// missing or malformed fields are skipped, not partially normalized.
pub fn normalize_ranked_coins(payload: &Value) -> Vec<SnapshotRecord> {
    let Some(coins) = payload.pointer("/data/coins").and_then(Value::as_array) else {
        return Vec::new();
    };

    let now = UtcDateTime::now();
    coins
        .iter()
        .filter_map(|coin| normalize_coin(coin, now))
        .collect()
}

fn normalize_coin(coin: &Value, now: UtcDateTime) -> Option<SnapshotRecord> {
    let symbol = Symbol::parse(coin.get("symbol")?.as_str()?).ok()?;
    let name = coin.get("name")?.as_str()?.to_owned();
    let price = coin.get("price").and_then(parse_numeric)?;
    let change = coin.get("change").and_then(parse_numeric)?;
    let percent = format!("{change:.2}%");

    SnapshotRecord::new(
        symbol,
        name,
        InstrumentKind::Crypto,
        price,
        change,
        percent,
        now,
    )
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChangeDirection;
    use serde_json::json;

    fn ranked_payload() -> Value {
        json!({
            "status": "success",
            "data": {
                "coins": [
                    {"symbol": "BTC", "name": "Bitcoin", "price": "64250.10", "change": "2.41"},
                    {"symbol": "ETH", "name": "Ethereum", "price": "3150.55", "change": "-1.05"},
                    {"symbol": "USDT", "name": "Tether", "price": "1.00", "change": "0"}
                ]
            }
        })
    }

    #[test]
    fn maps_each_coin_into_a_record() {
        let pool = normalize_ranked_coins(&ranked_payload());
        assert_eq!(pool.len(), 3);

        let btc = &pool[0];
        assert_eq!(btc.symbol.as_str(), "BTC");
        assert_eq!(btc.name, "Bitcoin");
        assert_eq!(btc.price, 64250.10);
        assert_eq!(btc.percent, "2.41%");
        assert_eq!(btc.direction, ChangeDirection::Up);
        assert_eq!(btc.kind, InstrumentKind::Crypto);
    }

    #[test]
    fn direction_covers_all_signs() {
        let pool = normalize_ranked_coins(&ranked_payload());

        assert_eq!(pool[0].direction, ChangeDirection::Up);
        assert_eq!(pool[1].direction, ChangeDirection::Down);
        assert_eq!(pool[2].direction, ChangeDirection::Neutral);
    }

    #[test]
    fn malformed_coin_is_skipped() {
        let payload = json!({"data": {"coins": [
            {"symbol": "BTC", "name": "Bitcoin", "price": "64250.10", "change": "oops"},
            {"symbol": "ETH", "name": "Ethereum", "price": "3150.55", "change": "-1.05"}
        ]}});

        let pool = normalize_ranked_coins(&payload);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].symbol.as_str(), "ETH");
    }

    #[test]
    fn missing_coin_list_yields_empty_pool() {
        assert!(normalize_ranked_coins(&json!({"status": "fail"})).is_empty());
    }
}
