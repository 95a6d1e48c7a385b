//! # Quotedeck Core
//!
//! Data-fetching and normalization pipeline for the quotedeck market
//! dashboard.
//!
//! ## Overview
//!
//! - **Canonical domain models** for instruments, snapshots, and chart series
//! - **Read-through request cache** with a freshness window and in-flight
//!   request deduplication
//! - **Provider adapters** (Alpha Vantage, CoinRanking) with per-provider
//!   cache keys and rate budgets
//! - **Pure normalizers** from provider wire shapes to canonical records
//! - **Snapshot aggregation** with per-instrument failure isolation
//! - **Dynamic field selection** over JSON payloads of unknown shape
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Alpha Vantage, CoinRanking) |
//! | [`aggregator`] | Batch snapshot aggregation |
//! | [`cache`] | Read-through request cache |
//! | [`config`] | Provider endpoints and credentials |
//! | [`domain`] | Domain models (Instrument, SnapshotRecord, SeriesPoint) |
//! | [`error`] | Core error types |
//! | [`fields`] | JSON leaf-path enumeration and resolution |
//! | [`history`] | Historical series fetching |
//! | [`http_client`] | HTTP client abstraction |
//! | [`normalize`] | Pure payload normalizers |
//! | [`provider_policy`] | Per-provider quota declarations |
//! | [`source`] | Provider identifiers |
//! | [`throttling`] | Token-bucket rate budgets |
//! | [`widget`] | User-defined API widgets |
//!
//! ## Data flow
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │ SnapshotAggregator│    │  HistoryFetcher  │
//! └────────┬──────────┘    └────────┬─────────┘
//!          │                        │
//!          ▼                        ▼
//! ┌─────────────────────────────────────────┐
//! │        Provider Adapters                │
//! │  (cache keys, rate budget, endpoints)   │
//! └────────┬────────────────────┬───────────┘
//!          │                    │
//!          ▼                    ▼
//! ┌─────────────────┐  ┌──────────────────┐
//! │  RequestCache   │  │   HttpClient     │
//! │ (read-through)  │  │ (reqwest/static) │
//! └─────────────────┘  └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Normalizers   │──▶ SnapshotRecord / SeriesPoint
//! └─────────────────┘
//! ```
//!
//! ## Error handling
//!
//! Adapters classify failures into [`SourceError`] kinds; inside a snapshot
//! batch every kind becomes skip-and-log, while direct calls (history,
//! rates, widgets) surface the error. Malformed series payloads degrade to
//! empty series rather than errors.
//!
//! ## Security
//!
//! API keys are read from environment variables only and never logged.

pub mod adapters;
pub mod aggregator;
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod fields;
pub mod history;
pub mod http_client;
pub mod normalize;
pub mod provider_policy;
pub mod source;
pub mod throttling;
pub mod widget;

// Re-export commonly used types at crate root for convenience

// Adapter implementations
pub use adapters::{AlphaVantageAdapter, CoinRankingAdapter};

// Orchestrators
pub use aggregator::SnapshotAggregator;
pub use history::{HistoryFetcher, HistoryRequest};

// Caching
pub use cache::{RequestCache, DEFAULT_FRESHNESS};

// Configuration
pub use config::ProviderConfig;

// Domain models
pub use domain::{
    ChangeDirection, Instrument, InstrumentKind, Interval, Ohlc, SeriesPoint, SnapshotRecord,
    Symbol, UtcDateTime,
};

// Error types
pub use error::{SourceError, SourceErrorKind, ValidationError};

// Field selection
pub use fields::{list_leaf_paths, resolve, FieldPath, FieldSelection};

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
    StaticHttpClient,
};

// Normalizers
pub use normalize::{
    normalize_crypto_history, normalize_exchange_rate, normalize_global_quote,
    normalize_ranked_coins, normalize_stock_history, NormalizeError,
};

// Provider policies
pub use provider_policy::ProviderPolicy;

// Source identifiers
pub use source::ProviderId;

// Throttling
pub use throttling::RateBudget;

// Widgets
pub use widget::{ChartType, ViewType, WidgetFetcher, WidgetSpec};
