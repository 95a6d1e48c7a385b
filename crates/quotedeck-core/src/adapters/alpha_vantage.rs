use std::sync::Arc;

use serde_json::Value;

use super::{check_error_envelope, UPSTREAM_TIMEOUT_MS};
use crate::http_client::{HttpClient, HttpRequest};
use crate::provider_policy::ProviderPolicy;
use crate::throttling::RateBudget;
use crate::{
    InstrumentKind, Interval, ProviderConfig, ProviderId, RequestCache, SourceError, Symbol,
};

/// Alpha Vantage adapter: quotes, exchange rates, and time series.
///
/// Every operation reads through the shared cache; the rate budget paces
/// actual upstream calls under the free-tier quota.
#[derive(Clone)]
pub struct AlphaVantageAdapter {
    http: Arc<dyn HttpClient>,
    cache: RequestCache,
    budget: RateBudget,
    base_url: String,
    api_key: String,
}

impl AlphaVantageAdapter {
    pub fn new(http: Arc<dyn HttpClient>, cache: RequestCache, config: &ProviderConfig) -> Self {
        Self {
            http,
            cache,
            budget: RateBudget::from_policy(&ProviderPolicy::alpha_vantage_default()),
            base_url: config.alpha_base_url.clone(),
            api_key: config.alpha_api_key.clone(),
        }
    }

    /// Replace the default budget, e.g. to share one budget across adapters
    /// hitting the same quota or to lift the cap in tests.
    pub fn with_budget(mut self, budget: RateBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn id(&self) -> ProviderId {
        ProviderId::AlphaVantage
    }

    /// Current quote for a stock or index symbol. Cache key `quote:{symbol}`.
    pub async fn global_quote(&self, symbol: &Symbol) -> Result<Value, SourceError> {
        let key = format!("quote:{symbol}");
        let url = format!(
            "{}?function=GLOBAL_QUOTE&symbol={}&apikey={}",
            self.base_url,
            urlencoding::encode(symbol.as_str()),
            self.api_key
        );
        self.call(&key, url).await
    }

    /// Spot exchange rate for a currency pair. Cache key `fx:{from}_{to}`.
    pub async fn forex_rate(&self, from: &str, to: &str) -> Result<Value, SourceError> {
        let key = format!("fx:{from}_{to}");
        let url = format!(
            "{}?function=CURRENCY_EXCHANGE_RATE&from_currency={}&to_currency={}&apikey={}",
            self.base_url,
            urlencoding::encode(from),
            urlencoding::encode(to),
            self.api_key
        );
        self.call(&key, url).await
    }

    /// USD rate for a crypto asset. Cache key `crypto:{symbol}`.
    pub async fn crypto_rate(&self, symbol: &Symbol) -> Result<Value, SourceError> {
        let key = format!("crypto:{symbol}");
        let url = format!(
            "{}?function=CURRENCY_EXCHANGE_RATE&from_currency={}&to_currency=USD&apikey={}",
            self.base_url,
            urlencoding::encode(symbol.as_str()),
            self.api_key
        );
        self.call(&key, url).await
    }

    /// 5-minute intraday series. Cache key `intraday:{symbol}`.
    pub async fn intraday_series(&self, symbol: &Symbol) -> Result<Value, SourceError> {
        let key = format!("intraday:{symbol}");
        let url = format!(
            "{}?function=TIME_SERIES_INTRADAY&symbol={}&interval=5min&apikey={}",
            self.base_url,
            urlencoding::encode(symbol.as_str()),
            self.api_key
        );
        self.call(&key, url).await
    }

    /// Daily history for charting. Cache key `history:{kind}:{symbol}:{interval}`.
    ///
    /// The upstream function is always TIME_SERIES_DAILY; the requested
    /// interval scopes the cache entry so interval switches refetch.
    pub async fn daily_series(
        &self,
        kind: InstrumentKind,
        symbol: &Symbol,
        interval: Interval,
    ) -> Result<Value, SourceError> {
        let key = format!("history:{kind}:{symbol}:{interval}");
        let url = format!(
            "{}?function=TIME_SERIES_DAILY&symbol={}&apikey={}",
            self.base_url,
            urlencoding::encode(symbol.as_str()),
            self.api_key
        );
        self.call(&key, url).await
    }

    async fn call(&self, cache_key: &str, url: String) -> Result<Value, SourceError> {
        let http = Arc::clone(&self.http);
        let budget = self.budget.clone();

        self.cache
            .fetch_through(cache_key, move || async move {
                budget.acquire().await;

                let request = HttpRequest::get(&url).with_timeout_ms(UPSTREAM_TIMEOUT_MS);
                let response = http.execute(request).await.map_err(|error| {
                    SourceError::unavailable(format!(
                        "alphavantage transport error: {}",
                        error.message()
                    ))
                })?;

                if !response.is_success() {
                    return Err(SourceError::unavailable(format!(
                        "alphavantage returned status {}",
                        response.status
                    )));
                }

                let payload: Value = serde_json::from_str(&response.body).map_err(|error| {
                    SourceError::malformed_payload(format!(
                        "alphavantage sent unparsable json: {error}"
                    ))
                })?;

                screen_payload(&payload)?;
                Ok(payload)
            })
            .await
    }
}

/// Alpha Vantage reports quota exhaustion in-band with a 200 status and a
/// `Note`/`Information` field, and bad symbols with `Error Message`.
fn screen_payload(payload: &Value) -> Result<(), SourceError> {
    check_error_envelope(payload)?;

    for sentinel in ["Note", "Information"] {
        if payload.get(sentinel).and_then(Value::as_str).is_some() {
            return Err(SourceError::rate_limited(
                "alphavantage signaled quota exhaustion",
            ));
        }
    }

    if let Some(message) = payload.get("Error Message").and_then(Value::as_str) {
        return Err(SourceError::malformed_payload(format!(
            "alphavantage rejected the request: {message}"
        )));
    }

    Ok(())
}
