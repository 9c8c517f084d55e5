mod common;

use common::MockSource;
use shuk_sdk::{BasketAggregator, ShukError, SortOrder};

fn milk_and_bread() -> MockSource {
    MockSource::new()
        .with_candidate("חלב", "m", "חלב תנובה 3%")
        .with_candidate("לחם", "b", "לחם אחיד פרוס")
        .with_price("m", "חנות א", Some("תל אביב"), 5.0)
        .with_price("m", "חנות ב", None, 6.0)
        .with_price("b", "חנות א", Some("תל אביב"), 4.0)
        .with_price("b", "חנות ג", None, 3.0)
}

fn queries(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_complete_and_partial_split() {
    let agg = BasketAggregator::new(milk_and_bread());
    let report = agg
        .find_best_basket(&queries(&["חלב", "לחם"]), "תל אביב")
        .unwrap();

    assert_eq!(report.complete.len(), 1);
    assert_eq!(report.complete[0].store_name, "חנות א");
    assert_eq!(report.complete[0].total_price, 9.0);
    assert_eq!(report.complete[0].item_count, 2);
    assert_eq!(report.complete[0].address, "תל אביב");

    // partials ordered cheapest first
    assert_eq!(report.partial.len(), 2);
    assert_eq!(report.partial[0].store_name, "חנות ג");
    assert_eq!(report.partial[0].total_price, 3.0);
    assert_eq!(report.partial[1].store_name, "חנות ב");

    // a single complete basket has nothing to compare against
    assert!(report.savings.is_none());

    assert_eq!(report.summary.products_requested, 2);
    assert_eq!(report.summary.products_resolved, 2);
    assert_eq!(report.summary.products_priced, 2);
    assert_eq!(report.summary.complete_stores, 1);
    assert_eq!(report.summary.partial_stores, 2);
}

#[test]
fn test_savings_spans_extreme_complete_baskets() {
    let source = MockSource::new()
        .with_candidate("חלב", "m", "חלב תנובה 3%")
        .with_price("m", "חנות א", None, 10.0)
        .with_price("m", "חנות ב", None, 12.0)
        .with_price("m", "חנות ג", None, 15.0);

    let agg = BasketAggregator::new(source);
    let report = agg.find_best_basket(&queries(&["חלב"]), "תל אביב").unwrap();

    assert_eq!(report.complete.len(), 3);
    let savings = report.savings.unwrap();
    assert_eq!(savings.cheapest.store_name, "חנות א");
    assert_eq!(savings.most_expensive.store_name, "חנות ג");
    assert_eq!(savings.savings_amount, 5.0);
    assert_eq!(savings.savings_percentage, 33.3);
    assert_eq!(savings.price_range, (10.0, 15.0));
}

#[test]
fn test_savings_computed_before_display_cap() {
    let mut source = MockSource::new().with_candidate("חלב", "m", "חלב תנובה 3%");
    for (i, price) in [4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 20.0].iter().enumerate() {
        source = source.with_price("m", &format!("חנות {}", i), None, *price);
    }

    let agg = BasketAggregator::new(source);
    let report = agg.find_best_basket(&queries(&["חלב"]), "תל אביב").unwrap();

    // display list is capped, but the spread still spans all seven stores
    assert_eq!(report.complete.len(), 5);
    assert_eq!(report.summary.complete_stores, 7);
    let savings = report.savings.unwrap();
    assert_eq!(savings.cheapest.total_price, 4.0);
    assert_eq!(savings.most_expensive.total_price, 20.0);
    assert_eq!(savings.savings_amount, 16.0);
}

#[test]
fn test_most_expensive_order() {
    let agg = BasketAggregator::new(milk_and_bread());
    let report = agg
        .find_most_expensive_basket(&queries(&["חלב", "לחם"]), "תל אביב")
        .unwrap();

    assert_eq!(report.partial[0].store_name, "חנות ב");
    assert_eq!(report.partial[0].total_price, 6.0);
    assert_eq!(report.partial[1].store_name, "חנות ג");
}

#[test]
fn test_equal_totals_tie_break_on_store_name() {
    let source = MockSource::new()
        .with_candidate("חלב", "m", "חלב")
        .with_price("m", "ב חנות", None, 7.0)
        .with_price("m", "א חנות", None, 7.0);

    let agg = BasketAggregator::new(source);
    let report = agg.find_best_basket(&queries(&["חלב"]), "תל אביב").unwrap();

    assert_eq!(report.complete[0].store_name, "א חנות");
    assert_eq!(report.complete[1].store_name, "ב חנות");
}

#[test]
fn test_duplicate_store_rows_keep_cheapest() {
    let source = MockSource::new()
        .with_candidate("חלב", "m", "חלב")
        .with_price("m", "חנות א", None, 7.0)
        .with_price("m", "חנות א", Some("סניף מרכז"), 5.0);

    let agg = BasketAggregator::new(source);
    let report = agg.find_best_basket(&queries(&["חלב"]), "תל אביב").unwrap();

    assert_eq!(report.complete.len(), 1);
    assert_eq!(report.complete[0].item_count, 1);
    assert_eq!(report.complete[0].total_price, 5.0);
}

#[test]
fn test_failed_search_recorded_and_skipped() {
    let agg = BasketAggregator::new(milk_and_bread());
    let report = agg
        .find_best_basket(&queries(&["חלב", "מוצר לא קיים"]), "תל אביב")
        .unwrap();

    // only milk resolved, so milk-only baskets are complete
    assert_eq!(report.summary.products_resolved, 1);
    assert_eq!(report.complete.len(), 2);
    assert_eq!(report.errors.search.len(), 1);
    assert!(report.errors.search[0].contains("מוצר לא קיים"));
}

#[test]
fn test_failed_comparison_blocks_completeness() {
    let source = MockSource::new()
        .with_candidate("חלב", "m", "חלב")
        .with_candidate("לחם", "b", "לחם")
        .with_price("m", "חנות א", None, 5.0);
    // "b" resolves but has no price rows anywhere

    let agg = BasketAggregator::new(source);
    let report = agg
        .find_best_basket(&queries(&["חלב", "לחם"]), "תל אביב")
        .unwrap();

    assert_eq!(report.summary.products_resolved, 2);
    assert_eq!(report.summary.products_priced, 1);
    assert!(report.complete.is_empty());
    assert_eq!(report.partial.len(), 1);
    assert_eq!(report.errors.comparison.len(), 1);
}

#[test]
fn test_no_products_found() {
    let agg = BasketAggregator::new(MockSource::new());
    let err = agg
        .find_best_basket(&queries(&["אין", "גם אין"]), "תל אביב")
        .unwrap_err();
    assert!(matches!(err, ShukError::NoProductsFound(ref msgs) if msgs.len() == 2));
}

#[test]
fn test_no_price_data() {
    let source = MockSource::new().with_candidate("חלב", "m", "חלב");
    let agg = BasketAggregator::new(source);
    let err = agg.find_best_basket(&queries(&["חלב"]), "תל אביב").unwrap_err();
    assert!(matches!(err, ShukError::NoPriceData(_)));
}

#[test]
fn test_empty_inputs_rejected() {
    let agg = BasketAggregator::new(MockSource::new());

    let err = agg.find_best_basket(&[], "תל אביב").unwrap_err();
    assert!(matches!(err, ShukError::InvalidArgument(_)));

    let err = agg.find_best_basket(&queries(&["חלב"]), "  ").unwrap_err();
    assert!(matches!(err, ShukError::InvalidArgument(_)));
}

#[test]
fn test_aggregation_is_idempotent() {
    let agg = BasketAggregator::new(milk_and_bread());
    let products = queries(&["חלב", "לחם"]);

    let a = agg.find_best_basket(&products, "תל אביב").unwrap();
    let b = agg.find_best_basket(&products, "תל אביב").unwrap();

    assert_eq!(
        serde_json::to_value(&a).unwrap(),
        serde_json::to_value(&b).unwrap()
    );
}

#[test]
fn test_unknown_address_upgraded_when_later_row_has_one() {
    let source = MockSource::new()
        .with_candidate("חלב", "m", "חלב")
        .with_candidate("לחם", "b", "לחם")
        .with_price("m", "חנות א", None, 5.0)
        .with_price("b", "חנות א", Some("רחוב הרצל 1"), 4.0);

    let agg = BasketAggregator::new(source);
    let report = agg
        .find_best_basket(&queries(&["חלב", "לחם"]), "תל אביב")
        .unwrap();

    assert_eq!(report.complete[0].address, "רחוב הרצל 1");
}

#[test]
fn test_fallback_flag_survives_into_line_items() {
    let source = MockSource::new()
        .with_candidate("חלב", "m", "חלב תנובה 3%")
        .with_candidate("לחם", "b", "לחם אחיד")
        .with_price("m", "חנות א", None, 5.0)
        .with_fallback_price("b", "חנות א", 8.5);

    let agg = BasketAggregator::new(source);
    let report = agg
        .find_best_basket(&queries(&["חלב", "לחם"]), "תל אביב")
        .unwrap();

    let basket = &report.complete[0];
    assert_eq!(basket.item_count, 2);
    let milk = basket.line_items.iter().find(|l| l.product.contains("חלב")).unwrap();
    let bread = basket.line_items.iter().find(|l| l.product.contains("לחם")).unwrap();
    assert!(!milk.is_fallback);
    assert!(bread.is_fallback);
    assert_eq!(basket.total_price, 13.5);
}

#[test]
fn test_sort_order_via_aggregate() {
    let agg = BasketAggregator::new(milk_and_bread());
    let asc = agg
        .aggregate(&queries(&["חלב"]), "תל אביב", SortOrder::CheapestFirst)
        .unwrap();
    let desc = agg
        .aggregate(&queries(&["חלב"]), "תל אביב", SortOrder::MostExpensiveFirst)
        .unwrap();

    assert!(asc.complete[0].total_price <= asc.complete[1].total_price);
    assert!(desc.complete[0].total_price >= desc.complete[1].total_price);
}
