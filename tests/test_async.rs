#![cfg(feature = "async")]

mod common;

use std::sync::Arc;

use common::MockSource;
use shuk_sdk::async_client::{aggregate_concurrent, find_best_basket_concurrent};
use shuk_sdk::{ShukError, SortOrder};

fn source() -> Arc<MockSource> {
    Arc::new(
        MockSource::new()
            .with_candidate("חלב", "m", "חלב תנובה 3%")
            .with_candidate("לחם", "b", "לחם אחיד")
            .with_price("m", "חנות א", None, 5.0)
            .with_price("m", "חנות ב", None, 6.0)
            .with_price("b", "חנות א", None, 4.0),
    )
}

#[tokio::test]
async fn test_concurrent_matches_sequential_semantics() {
    let report = find_best_basket_concurrent(
        source(),
        vec!["חלב".to_string(), "לחם".to_string()],
        "תל אביב".to_string(),
    )
    .await
    .unwrap();

    assert_eq!(report.complete.len(), 1);
    assert_eq!(report.complete[0].store_name, "חנות א");
    assert_eq!(report.complete[0].total_price, 9.0);
    assert_eq!(report.partial.len(), 1);
}

#[tokio::test]
async fn test_concurrent_per_product_failure_isolated() {
    let report = aggregate_concurrent(
        source(),
        vec!["חלב".to_string(), "לא קיים".to_string()],
        "תל אביב".to_string(),
        SortOrder::CheapestFirst,
    )
    .await
    .unwrap();

    assert_eq!(report.errors.search.len(), 1);
    assert_eq!(report.summary.products_resolved, 1);
}

#[tokio::test]
async fn test_concurrent_rejects_empty_inputs() {
    let err = aggregate_concurrent(
        source(),
        Vec::new(),
        "תל אביב".to_string(),
        SortOrder::CheapestFirst,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ShukError::InvalidArgument(_)));
}
