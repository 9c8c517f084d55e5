mod common;

use common::MockSource;
use shuk_sdk::Tools;

fn source() -> MockSource {
    MockSource::new()
        .with_candidate("חלב", "m", "חלב תנובה 3%")
        .with_price("m", "חנות א", Some("תל אביב"), 10.0)
        .with_price("m", "חנות ב", None, 15.0)
}

#[test]
fn test_search_product_payload() {
    let tools = Tools::new(source());
    let value = tools.search_product("חלב").unwrap();

    assert_eq!(value["product_id"], "m");
    assert_eq!(value["display_name"], "חלב תנובה 3%");
    assert_eq!(value["candidates"].as_array().unwrap().len(), 1);
}

#[test]
fn test_compare_results_payload() {
    let tools = Tools::new(source());
    let value = tools.compare_results("m", "תל אביב").unwrap();

    assert_eq!(value["store_count"], 2);
    assert_eq!(value["stores"][0]["store_name"], "חנות א");
    assert_eq!(value["stores"][0]["price"], 10.0);
}

#[test]
fn test_find_best_basket_includes_savings() {
    let tools = Tools::new(source());
    let value = tools
        .find_best_basket(&["חלב".to_string()], "תל אביב")
        .unwrap();

    assert_eq!(value["complete"][0]["store_name"], "חנות א");
    assert!(value["savings"].is_object());
    assert_eq!(value["savings"]["savings_amount"], 5.0);
}

#[test]
fn test_find_most_expensive_basket_omits_savings() {
    let tools = Tools::new(source());
    let value = tools
        .find_most_expensive_basket(&["חלב".to_string()], "תל אביב")
        .unwrap();

    assert_eq!(value["complete"][0]["store_name"], "חנות ב");
    assert!(value.get("savings").is_none());
}

#[test]
fn test_compare_results_rejects_empty_args() {
    let tools = Tools::new(source());

    let err = tools.compare_results("m", "").unwrap_err();
    assert!(matches!(err, shuk_sdk::ShukError::InvalidArgument(_)));

    let err = tools.compare_results("", "תל אביב").unwrap_err();
    assert!(matches!(err, shuk_sdk::ShukError::InvalidArgument(_)));
}

#[test]
fn test_calculate_savings_tool() {
    let tools = Tools::new(source());
    let report = tools
        .find_best_basket(&["חלב".to_string()], "תל אביב")
        .unwrap();

    let a: shuk_sdk::Basket =
        serde_json::from_value(report["complete"][0].clone()).unwrap();
    let b: shuk_sdk::Basket =
        serde_json::from_value(report["complete"][1].clone()).unwrap();

    let value = tools.calculate_savings(&b, &a).unwrap();
    assert_eq!(value["savings_amount"], 5.0);
    assert_eq!(value["savings_percentage"], 33.3);
}
