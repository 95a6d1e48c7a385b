use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::normalize::NormalizeError;

/// Validation and contract errors exposed by `quotedeck-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid instrument kind '{value}', expected one of stock, index, forex, crypto, commodity")]
    InvalidKind { value: String },
    #[error("invalid interval '{value}', expected one of 5m, 1h, 1d")]
    InvalidInterval { value: String },
    #[error("invalid provider '{value}', expected one of alphavantage, coinranking")]
    InvalidProvider { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
    #[error("unix timestamp out of range: {value}")]
    InvalidUnixTimestamp { value: i64 },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("forex symbol must be a '/'-separated pair: '{value}'")]
    InvalidForexPair { value: String },

    #[error("field path must contain at least one segment")]
    EmptyFieldPath,

    #[error("invalid view type '{value}', expected one of table, card, chart")]
    InvalidViewType { value: String },
    #[error("invalid chart type '{value}', expected one of line, candlestick")]
    InvalidChartType { value: String },
    #[error("widget api url cannot be empty")]
    EmptyWidgetUrl,
    #[error("widget refresh interval must be greater than zero")]
    InvalidRefreshInterval,
    #[error("candlestick widgets require exactly 4 selected fields, got {count}")]
    CandlestickFieldCount { count: usize },
}

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    MalformedPayload,
    InvalidRequest,
    Internal,
}

/// Structured source error shared by adapters and orchestrators.
///
/// `Clone` is required by the request cache, which broadcasts one producer
/// result to every in-flight waiter for the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn malformed_payload(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::MalformedPayload,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::MalformedPayload => "source.malformed_payload",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl From<NormalizeError> for SourceError {
    fn from(error: NormalizeError) -> Self {
        Self::malformed_payload(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_codes_follow_kind() {
        assert_eq!(SourceError::unavailable("x").code(), "source.unavailable");
        assert_eq!(SourceError::rate_limited("x").code(), "source.rate_limited");
        assert_eq!(
            SourceError::malformed_payload("x").code(),
            "source.malformed_payload"
        );
    }

    #[test]
    fn transport_kinds_are_retryable() {
        assert!(SourceError::unavailable("x").retryable());
        assert!(SourceError::rate_limited("x").retryable());
        assert!(!SourceError::malformed_payload("x").retryable());
        assert!(!SourceError::invalid_request("x").retryable());
    }
}
