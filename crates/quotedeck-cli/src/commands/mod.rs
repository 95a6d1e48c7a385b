mod history;
mod paths;
mod rate;
mod snapshot;
mod widget;

use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;

use quotedeck_core::{
    AlphaVantageAdapter, CoinRankingAdapter, HistoryFetcher, HttpClient, Instrument,
    InstrumentKind, ProviderConfig, ReqwestHttpClient, RequestCache, SnapshotAggregator, Symbol,
    WidgetFetcher,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Wired pipeline shared by all commands: one cache, one transport, one
/// rate budget per provider.
pub struct AppContext {
    pub aggregator: SnapshotAggregator,
    pub history: HistoryFetcher,
    pub widgets: WidgetFetcher,
    pub alpha: AlphaVantageAdapter,
    pub http: Arc<dyn HttpClient>,
}

impl AppContext {
    pub fn from_env() -> Self {
        let config = ProviderConfig::from_env();
        let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
        let cache = RequestCache::with_default_freshness();

        let alpha = AlphaVantageAdapter::new(Arc::clone(&http), cache.clone(), &config);
        let coins = CoinRankingAdapter::new(Arc::clone(&http), cache.clone(), &config);

        Self {
            aggregator: SnapshotAggregator::new(alpha.clone(), coins.clone()),
            history: HistoryFetcher::new(alpha.clone(), coins),
            widgets: WidgetFetcher::new(Arc::clone(&http), cache),
            alpha,
            http,
        }
    }
}

/// Renderable result of one command.
pub struct CommandOutput {
    pub data: Value,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CommandOutput {
    pub fn new(data: Value, header: Vec<&str>, rows: Vec<Vec<String>>) -> Self {
        Self {
            data,
            header: header.into_iter().map(str::to_owned).collect(),
            rows,
        }
    }
}

pub async fn run(cli: &Cli, context: &AppContext) -> Result<CommandOutput, CliError> {
    match &cli.command {
        Command::Snapshot(args) => snapshot::run(args, context).await,
        Command::History(args) => history::run(args, context).await,
        Command::Rate(args) => rate::run(args, context).await,
        Command::Widget(args) => widget::run(args, context).await,
        Command::Paths(args) => paths::run(args, context).await,
    }
}

/// Parse a `SYMBOL:KIND[:NAME]` instrument argument.
pub(crate) fn parse_instrument(raw: &str) -> Result<Instrument, CliError> {
    let mut parts = raw.splitn(3, ':');
    let symbol = parts
        .next()
        .ok_or_else(|| CliError::Command(format!("invalid instrument '{raw}'")))?;
    let kind = parts.next().ok_or_else(|| {
        CliError::Command(format!(
            "invalid instrument '{raw}', expected SYMBOL:KIND[:NAME]"
        ))
    })?;
    let name = parts.next().unwrap_or(symbol);

    let symbol = Symbol::parse(symbol)?;
    let kind = InstrumentKind::from_str(kind)?;
    Ok(Instrument::new(symbol, name, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_instrument_argument() {
        let instrument = parse_instrument("AAPL:stock:Apple Inc").expect("instrument");
        assert_eq!(instrument.symbol.as_str(), "AAPL");
        assert_eq!(instrument.kind, InstrumentKind::Stock);
        assert_eq!(instrument.name, "Apple Inc");
    }

    #[test]
    fn name_defaults_to_symbol() {
        let instrument = parse_instrument("BTC:crypto").expect("instrument");
        assert_eq!(instrument.name, "BTC");
    }

    #[test]
    fn rejects_missing_kind() {
        assert!(parse_instrument("AAPL").is_err());
    }
}
