//! Historical series fetching for the chart page.

use crate::adapters::{AlphaVantageAdapter, CoinRankingAdapter};
use crate::normalize::{normalize_crypto_history, normalize_stock_history};
use crate::{Instrument, InstrumentKind, Interval, SeriesPoint, SourceError, Symbol};

/// Parameters of one history request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: Symbol,
    pub kind: InstrumentKind,
    pub interval: Interval,
}

impl HistoryRequest {
    pub fn new(symbol: Symbol, kind: InstrumentKind, interval: Interval) -> Self {
        Self {
            symbol,
            kind,
            interval,
        }
    }

    pub fn for_instrument(instrument: &Instrument, interval: Interval) -> Self {
        Self::new(instrument.symbol.clone(), instrument.kind, interval)
    }
}

/// Resolves one instrument's chart series through the adapter matching its
/// kind and the corresponding normalizer.
///
/// A payload without the expected series container yields an empty series,
/// which callers must read as "no data". Transport failures propagate.
#[derive(Clone)]
pub struct HistoryFetcher {
    alpha: AlphaVantageAdapter,
    coins: CoinRankingAdapter,
}

impl HistoryFetcher {
    pub fn new(alpha: AlphaVantageAdapter, coins: CoinRankingAdapter) -> Self {
        Self { alpha, coins }
    }

    pub async fn fetch_history(
        &self,
        request: &HistoryRequest,
    ) -> Result<Vec<SeriesPoint>, SourceError> {
        match request.kind {
            InstrumentKind::Stock | InstrumentKind::Index => {
                let payload = if request.interval == Interval::FiveMinutes {
                    self.alpha.intraday_series(&request.symbol).await?
                } else {
                    self.alpha
                        .daily_series(request.kind, &request.symbol, request.interval)
                        .await?
                };
                Ok(normalize_stock_history(&payload))
            }
            InstrumentKind::Crypto => {
                let payload = self
                    .coins
                    .coin_history(&request.symbol, request.interval)
                    .await?;
                Ok(normalize_crypto_history(&payload))
            }
            InstrumentKind::Forex | InstrumentKind::Commodity => {
                Err(SourceError::invalid_request(format!(
                    "no history provider for {} instruments",
                    request.kind
                )))
            }
        }
    }
}
