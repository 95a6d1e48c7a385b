use std::time::Duration;

use crate::ProviderId;

/// Per-provider upstream quota declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderPolicy {
    pub provider: ProviderId,
    pub quota_window: Duration,
    pub quota_limit: u32,
}

impl ProviderPolicy {
    /// Alpha Vantage free tier: 5 requests per rolling minute.
    pub const fn alpha_vantage_default() -> Self {
        Self {
            provider: ProviderId::AlphaVantage,
            quota_window: Duration::from_secs(60),
            quota_limit: 5,
        }
    }

    /// CoinRanking via RapidAPI free tier.
    pub const fn coinranking_default() -> Self {
        Self {
            provider: ProviderId::CoinRanking,
            quota_window: Duration::from_secs(60),
            quota_limit: 30,
        }
    }

    pub const fn default_for(provider: ProviderId) -> Self {
        match provider {
            ProviderId::AlphaVantage => Self::alpha_vantage_default(),
            ProviderId::CoinRanking => Self::coinranking_default(),
        }
    }
}
