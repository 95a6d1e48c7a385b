use serde_json::Value;

use quotedeck_core::{fields, HttpClient, HttpRequest, SourceError};

use crate::cli::PathsArgs;
use crate::error::CliError;

use super::{AppContext, CommandOutput};

/// Preview an API payload and list its selectable leaf paths, the data
/// behind the widget editor's checkbox tree.
pub async fn run(args: &PathsArgs, context: &AppContext) -> Result<CommandOutput, CliError> {
    let request = HttpRequest::get(&args.url).with_timeout_ms(5_000);
    let response = context
        .http
        .execute(request)
        .await
        .map_err(|error| SourceError::unavailable(error.message().to_owned()))?;

    if !response.is_success() {
        return Err(
            SourceError::unavailable(format!("api returned status {}", response.status)).into(),
        );
    }

    let payload: Value = serde_json::from_str(&response.body)
        .map_err(|error| SourceError::malformed_payload(error.to_string()))?;

    let paths = fields::list_leaf_paths(&payload);
    let rendered: Vec<String> = paths.iter().map(ToString::to_string).collect();

    Ok(CommandOutput::new(
        serde_json::to_value(&paths)?,
        vec!["path"],
        rendered.into_iter().map(|path| vec![path]).collect(),
    ))
}
