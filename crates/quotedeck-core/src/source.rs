use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical provider identifiers used in policies and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    AlphaVantage,
    CoinRanking,
}

impl ProviderId {
    pub const ALL: [Self; 2] = [Self::AlphaVantage, Self::CoinRanking];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlphaVantage => "alphavantage",
            Self::CoinRanking => "coinranking",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "alphavantage" => Ok(Self::AlphaVantage),
            "coinranking" => Ok(Self::CoinRanking),
            other => Err(ValidationError::InvalidProvider {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider() {
        let provider = ProviderId::from_str(" AlphaVantage ").expect("must parse");
        assert_eq!(provider, ProviderId::AlphaVantage);
    }

    #[test]
    fn rejects_unknown_provider() {
        let err = ProviderId::from_str("bloomberg").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidProvider { .. }));
    }
}
