use std::str::FromStr;

use quotedeck_core::{HistoryRequest, InstrumentKind, Interval, Symbol};

use crate::cli::HistoryArgs;
use crate::error::CliError;

use super::{AppContext, CommandOutput};

pub async fn run(args: &HistoryArgs, context: &AppContext) -> Result<CommandOutput, CliError> {
    let request = HistoryRequest::new(
        Symbol::parse(&args.symbol)?,
        InstrumentKind::from_str(&args.kind)?,
        Interval::from_str(&args.interval)?,
    );

    let series = context.history.fetch_history(&request).await?;

    let rows = series
        .iter()
        .map(|point| {
            let candle = point.ohlc;
            let cell = |value: Option<f64>| {
                value.map_or_else(|| String::from("-"), |v| format!("{v:.4}"))
            };
            vec![
                point.time.clone(),
                format!("{:.4}", point.value),
                cell(candle.map(|c| c.open)),
                cell(candle.map(|c| c.high)),
                cell(candle.map(|c| c.low)),
                cell(candle.map(|c| c.close)),
            ]
        })
        .collect();

    Ok(CommandOutput::new(
        serde_json::to_value(&series)?,
        vec!["time", "value", "open", "high", "low", "close"],
        rows,
    ))
}
