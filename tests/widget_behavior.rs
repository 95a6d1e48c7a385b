//! Behavior-driven tests for user-defined API widgets.

use std::time::Duration;

use quotedeck_tests::{widget_fetcher, Arc, ScriptedHttpClient};

use quotedeck_core::{
    fields, ChartType, FieldPath, FieldSelection, SourceErrorKind, WidgetSpec,
};
use serde_json::json;

fn selection(paths: &[&str]) -> FieldSelection {
    FieldSelection::from_paths(
        paths
            .iter()
            .map(|p| FieldPath::from_dotted(p).expect("path"))
            .collect(),
    )
}

#[tokio::test]
async fn array_payloads_become_one_row_per_element() {
    let client = Arc::new(
        ScriptedHttpClient::new().on_ok("api.test/rows", r#"[{"a": 1}, {"a": 2}, {"a": 3}]"#),
    );
    let fetcher = widget_fetcher(client);
    let spec = WidgetSpec::new("Rows", "https://api.test/rows");

    let rows = fetcher.fetch(&spec).await.expect("rows");
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn non_array_payloads_become_a_single_row() {
    let client =
        Arc::new(ScriptedHttpClient::new().on_ok("api.test/row", r#"{"price": "1.5"}"#));
    let fetcher = widget_fetcher(client);
    let spec = WidgetSpec::new("Row", "https://api.test/row");

    let rows = fetcher.fetch(&spec).await.expect("rows");
    assert_eq!(rows, vec![json!({"price": "1.5"})]);
}

#[tokio::test]
async fn refresh_interval_governs_the_cache_entry() {
    let client = Arc::new(ScriptedHttpClient::new().on_ok("api.test/row", r#"{"a": 1}"#));
    let fetcher = widget_fetcher(Arc::clone(&client));
    let spec = WidgetSpec::new("Row", "https://api.test/row")
        .with_refresh_interval(Duration::from_millis(30));

    fetcher.fetch(&spec).await.expect("first");
    fetcher.fetch(&spec).await.expect("within interval");
    assert_eq!(client.calls_matching("api.test/row"), 1);

    tokio::time::sleep(Duration::from_millis(60)).await;
    fetcher.fetch(&spec).await.expect("after interval");
    assert_eq!(client.calls_matching("api.test/row"), 2);
}

#[tokio::test]
async fn widgets_with_distinct_urls_do_not_share_entries() {
    let client = Arc::new(
        ScriptedHttpClient::new()
            .on_ok("api.test/a", r#"{"a": 1}"#)
            .on_ok("api.test/b", r#"{"b": 2}"#),
    );
    let fetcher = widget_fetcher(Arc::clone(&client));

    let a = fetcher
        .fetch(&WidgetSpec::new("A", "https://api.test/a"))
        .await
        .expect("a");
    let b = fetcher
        .fetch(&WidgetSpec::new("B", "https://api.test/b"))
        .await
        .expect("b");

    assert_eq!(a, vec![json!({"a": 1})]);
    assert_eq!(b, vec![json!({"b": 2})]);
}

#[tokio::test]
async fn candlestick_widgets_without_four_fields_are_rejected_before_fetching() {
    let client = Arc::new(ScriptedHttpClient::new());
    let fetcher = widget_fetcher(Arc::clone(&client));
    let spec = WidgetSpec::new("OHLC", "https://api.test/candles")
        .with_chart(ChartType::Candlestick)
        .with_fields(selection(&["open", "close"]));

    let err = fetcher.fetch(&spec).await.expect_err("must fail");

    assert_eq!(err.kind(), SourceErrorKind::InvalidRequest);
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn upstream_failure_surfaces_as_a_widget_error() {
    let client = Arc::new(ScriptedHttpClient::new().on_status("api.test/row", 500, "oops"));
    let fetcher = widget_fetcher(client);
    let spec = WidgetSpec::new("Row", "https://api.test/row");

    let err = fetcher.fetch(&spec).await.expect_err("must fail");
    assert_eq!(err.kind(), SourceErrorKind::Unavailable);
}

#[tokio::test]
async fn selected_fields_resolve_per_row_with_placeholders_for_gaps() {
    let client = Arc::new(ScriptedHttpClient::new().on_ok(
        "api.test/rows",
        r#"[{"bid": 1.0, "ask": 1.1}, {"bid": 2.0}]"#,
    ));
    let fetcher = widget_fetcher(client);
    let spec = WidgetSpec::new("Book", "https://api.test/rows")
        .with_fields(selection(&["bid", "ask"]));

    let rows = fetcher.fetch(&spec).await.expect("rows");
    let ask = FieldPath::from_dotted("ask").expect("path");

    assert_eq!(fields::resolve(&rows[0], &ask), Some(&json!(1.1)));
    // The second row lacks the field; rendering falls back to a placeholder.
    assert_eq!(fields::resolve(&rows[1], &ask), None);
}
