use quotedeck_core::{normalize_exchange_rate, Instrument, InstrumentKind, Symbol};

use crate::cli::RateArgs;
use crate::error::CliError;

use super::{AppContext, CommandOutput};

pub async fn run(args: &RateArgs, context: &AppContext) -> Result<CommandOutput, CliError> {
    let (instrument, payload) = match (&args.pair, &args.crypto) {
        (Some(pair), _) => {
            let symbol = Symbol::parse(pair)?;
            let (from, to) = symbol.forex_pair()?;
            let payload = context.alpha.forex_rate(from, to).await?;
            let instrument = Instrument::new(symbol.clone(), pair, InstrumentKind::Forex);
            (instrument, payload)
        }
        (None, Some(crypto)) => {
            let symbol = Symbol::parse(crypto)?;
            let payload = context.alpha.crypto_rate(&symbol).await?;
            let name = format!("{symbol}/USD");
            let instrument = Instrument::new(symbol, name, InstrumentKind::Crypto);
            (instrument, payload)
        }
        (None, None) => {
            return Err(CliError::Command(String::from(
                "rate requires --pair or --crypto",
            )))
        }
    };

    let record = normalize_exchange_rate(&instrument, &payload)
        .map_err(quotedeck_core::SourceError::from)?;

    Ok(CommandOutput::new(
        serde_json::to_value(&record)?,
        vec!["symbol", "name", "price", "updated"],
        vec![vec![
            record.symbol.to_string(),
            record.name.clone(),
            format!("{:.6}", record.price),
            record.last_updated.to_string(),
        ]],
    ))
}
