use std::str::FromStr;
use std::time::Duration;

use serde_json::Value;

use quotedeck_core::{
    fields, ChartType, FieldPath, FieldSelection, ViewType, WidgetSpec,
};

use crate::cli::WidgetArgs;
use crate::error::CliError;

use super::{AppContext, CommandOutput};

pub async fn run(args: &WidgetArgs, context: &AppContext) -> Result<CommandOutput, CliError> {
    let mut spec = WidgetSpec::new("cli widget", &args.url)
        .with_refresh_interval(Duration::from_secs(args.refresh_secs))
        .with_view(ViewType::from_str(&args.view)?);
    if let Some(chart) = &args.chart {
        spec = spec.with_chart(ChartType::from_str(chart)?);
    }

    let selected = args
        .fields
        .iter()
        .map(|raw| FieldPath::from_dotted(raw))
        .collect::<Result<Vec<_>, _>>()?;
    spec = spec.with_fields(FieldSelection::from_paths(selected));

    let rows = context.widgets.fetch(&spec).await?;

    // No explicit selection: show every leaf of the first row.
    let selection = if spec.fields.is_empty() {
        FieldSelection::from_paths(rows.first().map(fields::list_leaf_paths).unwrap_or_default())
    } else {
        spec.fields.clone()
    };

    let header: Vec<String> = selection.paths().iter().map(ToString::to_string).collect();
    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            selection
                .paths()
                .iter()
                .map(|path| {
                    fields::resolve(row, path).map_or_else(|| String::from("-"), render_cell)
                })
                .collect()
        })
        .collect();

    Ok(CommandOutput {
        data: serde_json::to_value(&rows)?,
        header,
        rows: table,
    })
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
