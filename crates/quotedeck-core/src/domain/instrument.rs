use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Symbol, ValidationError};

/// Instrument classification used for adapter dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    Stock,
    Index,
    Forex,
    Crypto,
    Commodity,
}

impl InstrumentKind {
    pub const ALL: [Self; 5] = [
        Self::Stock,
        Self::Index,
        Self::Forex,
        Self::Crypto,
        Self::Commodity,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::Index => "index",
            Self::Forex => "forex",
            Self::Crypto => "crypto",
            Self::Commodity => "commodity",
        }
    }
}

impl Display for InstrumentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstrumentKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stock" => Ok(Self::Stock),
            "index" => Ok(Self::Index),
            "forex" => Ok(Self::Forex),
            "crypto" => Ok(Self::Crypto),
            "commodity" => Ok(Self::Commodity),
            other => Err(ValidationError::InvalidKind {
                value: other.to_owned(),
            }),
        }
    }
}

/// Immutable reference data for one requested instrument.
///
/// Supplied by the caller (watchlists, dashboard categories); the pipeline
/// never creates or destroys instruments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: Symbol,
    pub name: String,
    pub kind: InstrumentKind,
}

impl Instrument {
    pub fn new(symbol: Symbol, name: impl Into<String>, kind: InstrumentKind) -> Self {
        Self {
            symbol,
            name: name.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind() {
        let kind = InstrumentKind::from_str("Crypto").expect("must parse");
        assert_eq!(kind, InstrumentKind::Crypto);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = InstrumentKind::from_str("bond").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidKind { .. }));
    }
}
