//! Batch snapshot aggregation across provider adapters.

use tracing::{debug, warn};

use crate::adapters::{AlphaVantageAdapter, CoinRankingAdapter};
use crate::normalize::{normalize_exchange_rate, normalize_global_quote, normalize_ranked_coins};
use crate::{Instrument, InstrumentKind, SnapshotRecord, SourceError};

/// Builds a batch of snapshot records for a requested set of instruments.
///
/// Failures are isolated per instrument: a failed resolution is logged and
/// the instrument is simply absent from the result, the batch itself never
/// errors. Result ordering is insertion order of successful resolutions,
/// not input order.
#[derive(Clone)]
pub struct SnapshotAggregator {
    alpha: AlphaVantageAdapter,
    coins: CoinRankingAdapter,
}

impl SnapshotAggregator {
    pub fn new(alpha: AlphaVantageAdapter, coins: CoinRankingAdapter) -> Self {
        Self { alpha, coins }
    }

    pub async fn fetch_snapshot(&self, instruments: &[Instrument]) -> Vec<SnapshotRecord> {
        let mut results = Vec::new();

        self.resolve_crypto(instruments, &mut results).await;

        // Quote providers enforce strict per-minute quotas; resolving one at
        // a time keeps the shared rate budget honest.
        for instrument in instruments {
            if instrument.kind == InstrumentKind::Crypto {
                continue;
            }

            match self.resolve_one(instrument).await {
                Ok(record) => results.push(record),
                Err(error) => warn!(
                    symbol = %instrument.symbol,
                    kind = instrument.kind.as_str(),
                    %error,
                    "snapshot skipped"
                ),
            }
        }

        debug!(
            requested = instruments.len(),
            resolved = results.len(),
            "snapshot batch complete"
        );
        results
    }

    /// All crypto instruments of a batch resolve through exactly one bulk
    /// ranked-coins call, matched back to the requested symbols.
    async fn resolve_crypto(&self, instruments: &[Instrument], results: &mut Vec<SnapshotRecord>) {
        let requested: Vec<&Instrument> = instruments
            .iter()
            .filter(|instrument| instrument.kind == InstrumentKind::Crypto)
            .collect();
        if requested.is_empty() {
            return;
        }

        let payload = match self.coins.ranked_coins().await {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%error, "bulk crypto snapshot failed");
                return;
            }
        };

        let pool = normalize_ranked_coins(&payload);
        for instrument in requested {
            match pool.iter().find(|record| record.symbol == instrument.symbol) {
                Some(record) => results.push(record.clone()),
                // The bulk call only covers the ranked top set; a symbol
                // outside it has no match and is skipped.
                None => warn!(
                    symbol = %instrument.symbol,
                    "symbol not in ranked coin set, snapshot skipped"
                ),
            }
        }
    }

    async fn resolve_one(&self, instrument: &Instrument) -> Result<SnapshotRecord, SourceError> {
        match instrument.kind {
            InstrumentKind::Stock | InstrumentKind::Index => {
                let payload = self.alpha.global_quote(&instrument.symbol).await?;
                Ok(normalize_global_quote(instrument, &payload)?)
            }
            InstrumentKind::Forex => {
                let (from, to) = instrument
                    .symbol
                    .forex_pair()
                    .map_err(|error| SourceError::invalid_request(error.to_string()))?;
                let payload = self.alpha.forex_rate(from, to).await?;
                Ok(normalize_exchange_rate(instrument, &payload)?)
            }
            InstrumentKind::Commodity => Err(SourceError::invalid_request(
                "commodity snapshots have no upstream provider",
            )),
            InstrumentKind::Crypto => Err(SourceError::internal(
                "crypto instruments resolve through the bulk ranked-coins call",
            )),
        }
    }
}
