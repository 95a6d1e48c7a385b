use std::sync::Arc;

use serde_json::Value;

use super::{check_error_envelope, UPSTREAM_TIMEOUT_MS};
use crate::http_client::{HttpAuth, HttpClient, HttpRequest};
use crate::provider_policy::ProviderPolicy;
use crate::throttling::RateBudget;
use crate::{Interval, ProviderConfig, ProviderId, RequestCache, SourceError, Symbol};

/// Reference currency UUID for USD pricing on CoinRanking.
const USD_REFERENCE_UUID: &str = "yhjMzLPhuIDl";

/// Number of ranked assets one bulk call covers.
const RANKED_LIMIT: u32 = 50;

/// CoinRanking adapter: bulk ranked coins and per-coin price history.
#[derive(Clone)]
pub struct CoinRankingAdapter {
    http: Arc<dyn HttpClient>,
    cache: RequestCache,
    budget: RateBudget,
    base_url: String,
    api_key: String,
    host: String,
}

impl CoinRankingAdapter {
    pub fn new(http: Arc<dyn HttpClient>, cache: RequestCache, config: &ProviderConfig) -> Self {
        Self {
            http,
            cache,
            budget: RateBudget::from_policy(&ProviderPolicy::coinranking_default()),
            base_url: config.coinranking_base_url.clone(),
            api_key: config.rapidapi_key.clone(),
            host: config.coinranking_host().to_owned(),
        }
    }

    pub fn with_budget(mut self, budget: RateBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn id(&self) -> ProviderId {
        ProviderId::CoinRanking
    }

    /// Top-50 coins by market cap, one shared payload for all crypto
    /// instruments of a pass. Cache key `coinranking`.
    pub async fn ranked_coins(&self) -> Result<Value, SourceError> {
        let url = format!(
            "{}/coins?referenceCurrencyUuid={USD_REFERENCE_UUID}&timePeriod=24h&tiers[0]=1&orderBy=marketCap&orderDirection=desc&limit={RANKED_LIMIT}&offset=0",
            self.base_url
        );
        self.call("coinranking", url).await
    }

    /// Price history for one coin. Cache key `history:crypto:{symbol}:{interval}`.
    pub async fn coin_history(
        &self,
        symbol: &Symbol,
        interval: Interval,
    ) -> Result<Value, SourceError> {
        let key = format!("history:crypto:{symbol}:{interval}");
        let url = format!(
            "{}/coin/{}/history?referenceCurrencyUuid={USD_REFERENCE_UUID}&timePeriod={}",
            self.base_url,
            urlencoding::encode(symbol.as_str()),
            time_period(interval)
        );
        self.call(&key, url).await
    }

    async fn call(&self, cache_key: &str, url: String) -> Result<Value, SourceError> {
        let http = Arc::clone(&self.http);
        let budget = self.budget.clone();
        let auth = HttpAuth::Header {
            name: String::from("X-RapidAPI-Key"),
            value: self.api_key.clone(),
        };
        let host = self.host.clone();

        self.cache
            .fetch_through(cache_key, move || async move {
                budget.acquire().await;

                let request = HttpRequest::get(&url)
                    .with_auth(&auth)
                    .with_header("X-RapidAPI-Host", host)
                    .with_timeout_ms(UPSTREAM_TIMEOUT_MS);

                let response = http.execute(request).await.map_err(|error| {
                    SourceError::unavailable(format!(
                        "coinranking transport error: {}",
                        error.message()
                    ))
                })?;

                if !response.is_success() {
                    return Err(SourceError::unavailable(format!(
                        "coinranking returned status {}",
                        response.status
                    )));
                }

                let payload: Value = serde_json::from_str(&response.body).map_err(|error| {
                    SourceError::malformed_payload(format!(
                        "coinranking sent unparsable json: {error}"
                    ))
                })?;

                check_error_envelope(&payload)?;
                Ok(payload)
            })
            .await
    }
}

/// CoinRanking buckets history by fixed time periods; map chart intervals
/// onto the nearest useful window.
fn time_period(interval: Interval) -> &'static str {
    match interval {
        Interval::FiveMinutes => "1h",
        Interval::OneHour => "24h",
        Interval::OneDay => "30d",
    }
}
