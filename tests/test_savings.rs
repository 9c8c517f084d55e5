use shuk_sdk::{calculate_savings, Basket, LineItem, ShukError};

fn basket(store: &str, total: f64) -> Basket {
    Basket {
        store_name: store.to_string(),
        address: "תל אביב".to_string(),
        line_items: vec![LineItem {
            product: "חלב".to_string(),
            price: total,
            is_fallback: false,
        }],
        total_price: total,
        item_count: 1,
    }
}

#[test]
fn test_basic_savings() {
    let report = calculate_savings(&basket("א", 10.0), &basket("ב", 15.0)).unwrap();
    assert_eq!(report.cheapest.store_name, "א");
    assert_eq!(report.most_expensive.store_name, "ב");
    assert_eq!(report.savings_amount, 5.0);
    assert_eq!(report.savings_percentage, 33.3);
    assert_eq!(report.price_range, (10.0, 15.0));
}

#[test]
fn test_swapped_inputs_are_normalized() {
    let report = calculate_savings(&basket("ב", 15.0), &basket("א", 10.0)).unwrap();
    assert_eq!(report.cheapest.store_name, "א");
    assert_eq!(report.savings_amount, 5.0);
}

#[test]
fn test_equal_totals() {
    let report = calculate_savings(&basket("א", 12.0), &basket("ב", 12.0)).unwrap();
    assert_eq!(report.savings_amount, 0.0);
    assert_eq!(report.savings_percentage, 0.0);
}

#[test]
fn test_zero_totals_do_not_divide() {
    let report = calculate_savings(&basket("א", 0.0), &basket("ב", 0.0)).unwrap();
    assert_eq!(report.savings_percentage, 0.0);
}

#[test]
fn test_amount_rounded_to_cents() {
    let report = calculate_savings(&basket("א", 10.111), &basket("ב", 15.333)).unwrap();
    assert_eq!(report.savings_amount, 5.22);
}

#[test]
fn test_negative_total_rejected() {
    let err = calculate_savings(&basket("א", -1.0), &basket("ב", 10.0)).unwrap_err();
    assert!(matches!(err, ShukError::InvalidArgument(_)));
}
