//! Provider endpoints and credentials from process configuration.
//!
//! Key values are secrets: they flow into request construction only and are
//! never logged or embedded in error messages.

use std::env;

pub const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const COINRANKING_BASE_URL: &str = "https://coinranking1.p.rapidapi.com";

/// Upstream endpoints and API keys for the provider adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub alpha_base_url: String,
    pub alpha_api_key: String,
    pub coinranking_base_url: String,
    pub rapidapi_key: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            alpha_base_url: ALPHA_VANTAGE_BASE_URL.to_owned(),
            alpha_api_key: String::from("demo"),
            coinranking_base_url: COINRANKING_BASE_URL.to_owned(),
            rapidapi_key: String::from("demo"),
        }
    }
}

impl ProviderConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            alpha_base_url: env::var("ALPHA_VANTAGE_BASE_URL").unwrap_or(defaults.alpha_base_url),
            alpha_api_key: env::var("QUOTEDECK_ALPHAVANTAGE_API_KEY")
                .or_else(|_| env::var("ALPHA_VANTAGE_API_KEY"))
                .unwrap_or(defaults.alpha_api_key),
            coinranking_base_url: env::var("COINRANKING_BASE_URL")
                .unwrap_or(defaults.coinranking_base_url),
            rapidapi_key: env::var("QUOTEDECK_RAPIDAPI_KEY")
                .or_else(|_| env::var("RAPIDAPI_KEY"))
                .unwrap_or(defaults.rapidapi_key),
        }
    }

    pub fn with_alpha_base_url(mut self, url: impl Into<String>) -> Self {
        self.alpha_base_url = url.into();
        self
    }

    pub fn with_alpha_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_api_key = key.into();
        self
    }

    pub fn with_coinranking_base_url(mut self, url: impl Into<String>) -> Self {
        self.coinranking_base_url = url.into();
        self
    }

    pub fn with_rapidapi_key(mut self, key: impl Into<String>) -> Self {
        self.rapidapi_key = key.into();
        self
    }

    /// Host header value RapidAPI expects, derived from the base URL.
    pub fn coinranking_host(&self) -> &str {
        let without_scheme = self
            .coinranking_base_url
            .split_once("://")
            .map_or(self.coinranking_base_url.as_str(), |(_, rest)| rest);
        without_scheme
            .split_once('/')
            .map_or(without_scheme, |(host, _)| host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_production_endpoints() {
        let config = ProviderConfig::default();
        assert_eq!(config.alpha_base_url, ALPHA_VANTAGE_BASE_URL);
        assert_eq!(config.coinranking_host(), "coinranking1.p.rapidapi.com");
    }

    #[test]
    fn host_strips_scheme_and_path() {
        let config =
            ProviderConfig::default().with_coinranking_base_url("http://localhost:9900/api");
        assert_eq!(config.coinranking_host(), "localhost:9900");
    }
}
