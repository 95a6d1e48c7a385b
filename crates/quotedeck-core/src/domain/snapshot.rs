use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{InstrumentKind, Symbol, UtcDateTime, ValidationError};

/// Sign classification of a price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDirection {
    Up,
    Down,
    Neutral,
}

impl ChangeDirection {
    /// Deterministic mapping from the sign of `change`.
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Self::Up
        } else if change < 0.0 {
            Self::Down
        } else {
            Self::Neutral
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Neutral => "neutral",
        }
    }
}

impl Display for ChangeDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time price/change record for one instrument.
///
/// Produced fresh on every successful normalization and never mutated in
/// place; consumers replace their held copy wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub symbol: Symbol,
    pub name: String,
    pub kind: InstrumentKind,
    pub price: f64,
    pub change: f64,
    pub percent: String,
    pub direction: ChangeDirection,
    pub last_updated: UtcDateTime,
}

impl SnapshotRecord {
    /// Build a record; `direction` is always derived from the sign of
    /// `change`, callers cannot supply a mismatched value.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: Symbol,
        name: impl Into<String>,
        kind: InstrumentKind,
        price: f64,
        change: f64,
        percent: impl Into<String>,
        last_updated: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        if !price.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "price" });
        }
        if price < 0.0 {
            return Err(ValidationError::NegativeValue { field: "price" });
        }
        if !change.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "change" });
        }

        Ok(Self {
            symbol,
            name: name.into(),
            kind,
            price,
            change,
            percent: percent.into(),
            direction: ChangeDirection::from_change(change),
            last_updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_follows_change_sign() {
        assert_eq!(ChangeDirection::from_change(5.0), ChangeDirection::Up);
        assert_eq!(ChangeDirection::from_change(-5.0), ChangeDirection::Down);
        assert_eq!(ChangeDirection::from_change(0.0), ChangeDirection::Neutral);
        assert_eq!(ChangeDirection::from_change(0.0001), ChangeDirection::Up);
        assert_eq!(ChangeDirection::from_change(-0.0001), ChangeDirection::Down);
    }

    #[test]
    fn record_derives_direction() {
        let record = SnapshotRecord::new(
            Symbol::parse("AAPL").expect("symbol"),
            "Apple Inc",
            InstrumentKind::Stock,
            190.0,
            -1.25,
            "-0.65%",
            UtcDateTime::parse("2024-01-01T00:00:00Z").expect("timestamp"),
        )
        .expect("record should build");

        assert_eq!(record.direction, ChangeDirection::Down);
    }

    #[test]
    fn rejects_non_finite_price() {
        let err = SnapshotRecord::new(
            Symbol::parse("AAPL").expect("symbol"),
            "Apple Inc",
            InstrumentKind::Stock,
            f64::NAN,
            0.0,
            "0%",
            UtcDateTime::parse("2024-01-01T00:00:00Z").expect("timestamp"),
        )
        .expect_err("must fail");
        assert!(matches!(err, ValidationError::NonFiniteValue { .. }));
    }
}
