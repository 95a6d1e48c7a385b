use clap::{Args, Parser, Subcommand, ValueEnum};

/// Market-data pipeline CLI: snapshots, chart series, rates, and widgets.
#[derive(Debug, Parser)]
#[command(name = "quotedeck", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch snapshot records for a set of instruments
    Snapshot(SnapshotArgs),
    /// Fetch a chart series for one instrument
    History(HistoryArgs),
    /// Fetch a single exchange rate
    Rate(RateArgs),
    /// Fetch a widget's rows and resolve its selected fields
    Widget(WidgetArgs),
    /// List selectable leaf paths of an API payload
    Paths(PathsArgs),
}

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Instruments as SYMBOL:KIND[:NAME], e.g. 'AAPL:stock:Apple Inc'
    #[arg(required = true)]
    pub instruments: Vec<String>,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Instrument symbol, e.g. AAPL or BTC
    #[arg(long)]
    pub symbol: String,

    /// Instrument kind: stock, index, or crypto
    #[arg(long)]
    pub kind: String,

    /// Chart interval: 5m, 1h, or 1d
    #[arg(long, default_value = "1d")]
    pub interval: String,
}

#[derive(Debug, Args)]
pub struct RateArgs {
    /// Forex pair, e.g. EUR/USD
    #[arg(long, conflicts_with = "crypto")]
    pub pair: Option<String>,

    /// Crypto symbol quoted in USD, e.g. BTC
    #[arg(long)]
    pub crypto: Option<String>,
}

#[derive(Debug, Args)]
pub struct WidgetArgs {
    /// Widget API endpoint URL
    #[arg(long)]
    pub url: String,

    /// Dot-separated field path to show, repeatable; defaults to every
    /// leaf path of the first row
    #[arg(long = "field")]
    pub fields: Vec<String>,

    /// View type: table, card, or chart
    #[arg(long, default_value = "table")]
    pub view: String,

    /// Chart type for chart views: line or candlestick
    #[arg(long)]
    pub chart: Option<String>,

    /// Refresh interval in seconds (governs the cache entry's lifetime)
    #[arg(long, default_value_t = 30)]
    pub refresh_secs: u64,
}

#[derive(Debug, Args)]
pub struct PathsArgs {
    /// API endpoint URL to explore
    #[arg(long)]
    pub url: String,
}
