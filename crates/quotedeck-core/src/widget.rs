//! User-defined API widgets.
//!
//! A widget points at an arbitrary JSON API and selects fields by path; the
//! fetcher caches the payload under the widget's own refresh interval
//! rather than the cache's default window.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::adapters::UPSTREAM_TIMEOUT_MS;
use crate::fields::FieldSelection;
use crate::http_client::{HttpClient, HttpRequest};
use crate::{RequestCache, SourceError, ValidationError};

/// How a widget renders its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    Table,
    Card,
    Chart,
}

impl ViewType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Card => "card",
            Self::Chart => "chart",
        }
    }
}

impl Display for ViewType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "card" => Ok(Self::Card),
            "chart" => Ok(Self::Chart),
            other => Err(ValidationError::InvalidViewType {
                value: other.to_owned(),
            }),
        }
    }
}

/// Chart flavor for chart-view widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Line,
    Candlestick,
}

impl ChartType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Candlestick => "candlestick",
        }
    }
}

impl Display for ChartType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "candlestick" => Ok(Self::Candlestick),
            other => Err(ValidationError::InvalidChartType {
                value: other.to_owned(),
            }),
        }
    }
}

/// One user-configured widget definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSpec {
    pub id: Uuid,
    pub name: String,
    pub api_url: String,
    pub refresh_interval: Duration,
    pub fields: FieldSelection,
    pub view: ViewType,
    pub chart: Option<ChartType>,
}

impl WidgetSpec {
    pub fn new(name: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            api_url: api_url.into(),
            refresh_interval: Duration::from_secs(30),
            fields: FieldSelection::new(),
            view: ViewType::Table,
            chart: None,
        }
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_fields(mut self, fields: FieldSelection) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_view(mut self, view: ViewType) -> Self {
        self.view = view;
        self
    }

    pub fn with_chart(mut self, chart: ChartType) -> Self {
        self.view = ViewType::Chart;
        self.chart = Some(chart);
        self
    }

    /// Reject configurations the renderers cannot draw.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_url.trim().is_empty() {
            return Err(ValidationError::EmptyWidgetUrl);
        }
        if self.refresh_interval.is_zero() {
            return Err(ValidationError::InvalidRefreshInterval);
        }
        if self.view == ViewType::Chart
            && self.chart == Some(ChartType::Candlestick)
            && self.fields.len() != 4
        {
            return Err(ValidationError::CandlestickFieldCount {
                count: self.fields.len(),
            });
        }
        Ok(())
    }
}

/// Fetches widget payloads through the shared cache.
#[derive(Clone)]
pub struct WidgetFetcher {
    http: Arc<dyn HttpClient>,
    cache: RequestCache,
}

impl WidgetFetcher {
    pub fn new(http: Arc<dyn HttpClient>, cache: RequestCache) -> Self {
        Self { http, cache }
    }

    /// Fetch a widget's rows. Cache key `widget:{api_url}`, entry TTL is the
    /// widget's refresh interval.
    ///
    /// Shape safety, not normalization: an array payload is one row per
    /// element, any other JSON value is a single row.
    pub async fn fetch(&self, spec: &WidgetSpec) -> Result<Vec<Value>, SourceError> {
        spec.validate()
            .map_err(|error| SourceError::invalid_request(error.to_string()))?;

        let key = format!("widget:{}", spec.api_url);
        let http = Arc::clone(&self.http);
        let url = spec.api_url.clone();

        let payload = self
            .cache
            .fetch_through_with_ttl(&key, Some(spec.refresh_interval), move || async move {
                let request = HttpRequest::get(&url).with_timeout_ms(UPSTREAM_TIMEOUT_MS);
                let response = http.execute(request).await.map_err(|error| {
                    SourceError::unavailable(format!(
                        "widget transport error: {}",
                        error.message()
                    ))
                })?;

                if !response.is_success() {
                    return Err(SourceError::unavailable(format!(
                        "widget api returned status {}",
                        response.status
                    )));
                }

                serde_json::from_str(&response.body).map_err(|error| {
                    SourceError::malformed_payload(format!(
                        "widget api sent unparsable json: {error}"
                    ))
                })
            })
            .await?;

        Ok(rows(payload))
    }
}

fn rows(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        other => vec![other],
    }
}
