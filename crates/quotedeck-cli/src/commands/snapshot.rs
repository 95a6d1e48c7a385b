use crate::cli::SnapshotArgs;
use crate::error::CliError;

use super::{parse_instrument, AppContext, CommandOutput};

pub async fn run(args: &SnapshotArgs, context: &AppContext) -> Result<CommandOutput, CliError> {
    let instruments = args
        .instruments
        .iter()
        .map(|raw| parse_instrument(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let records = context.aggregator.fetch_snapshot(&instruments).await;

    let rows = records
        .iter()
        .map(|record| {
            vec![
                record.symbol.to_string(),
                record.name.clone(),
                record.kind.to_string(),
                format!("{:.4}", record.price),
                format!("{:+.4}", record.change),
                record.percent.clone(),
                record.direction.to_string(),
                record.last_updated.to_string(),
            ]
        })
        .collect();

    Ok(CommandOutput::new(
        serde_json::to_value(&records)?,
        vec![
            "symbol", "name", "kind", "price", "change", "percent", "direction", "updated",
        ],
        rows,
    ))
}
