use shuk_sdk::source::extract::{extract_store_rows, parse_price};

#[test]
fn test_parse_price_plain() {
    assert_eq!(parse_price("5.90"), Some(5.9));
    assert_eq!(parse_price(" ₪ 7.5 "), Some(7.5));
}

#[test]
fn test_parse_price_decimal_comma() {
    assert_eq!(parse_price("12,34"), Some(12.34));
}

#[test]
fn test_parse_price_thousands_separator() {
    assert_eq!(parse_price("1,23.45"), Some(123.45));
}

#[test]
fn test_parse_price_rejects_noise() {
    assert_eq!(parse_price("הכלול במחיר הכללי"), None);
    assert_eq!(parse_price("לא זמין"), None);
    assert_eq!(parse_price("-"), None);
    assert_eq!(parse_price(""), None);
    assert_eq!(parse_price("מבצע"), None);
}

#[test]
fn test_parse_price_rejects_implausible() {
    assert_eq!(parse_price("0"), None);
    assert_eq!(parse_price("1000"), None);
    assert_eq!(parse_price("999.99"), Some(999.99));
}

#[test]
fn test_extract_from_results_table() {
    let html = r#"
        <table>
          <tr class="line-odd">
            <td>שופרסל דיל</td><td>1</td><td>תל אביב</td><td>רגיל</td><td>5.90</td>
          </tr>
          <tr class="line-even">
            <td>רמי לוי</td><td>2</td><td>תל אביב</td><td>מבצע</td><td>5.50</td>
          </tr>
        </table>"#;

    let rows = extract_store_rows(html);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].store_name, "שופרסל דיל");
    assert_eq!(rows[0].address.as_deref(), Some("תל אביב"));
    assert_eq!(rows[0].price, 5.9);
    assert_eq!(rows[1].price, 5.5);
    assert!(rows.iter().all(|r| !r.is_fallback));
}

#[test]
fn test_extract_scans_cells_when_price_column_moves() {
    let html = r#"
        <table>
          <tr class="line-odd">
            <td>מגה בעיר</td><td>6.20</td>
          </tr>
        </table>"#;

    let rows = extract_store_rows(html);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].price, 6.2);
}

#[test]
fn test_extract_generic_table_fallback() {
    let html = r#"
        <table>
          <tr><th>חנות</th><th>מחיר</th></tr>
          <tr><td>רמי לוי</td><td>₪ 6.40</td></tr>
        </table>"#;

    let rows = extract_store_rows(html);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].store_name, "רמי לוי");
    assert_eq!(rows[0].price, 6.4);
    assert_eq!(rows[0].address, None);
}

#[test]
fn test_extract_text_pattern_fallback() {
    let html = "<div><span>שופרסל שלי</span> <span>₪ 7.90</span></div>";
    let rows = extract_store_rows(html);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].store_name.contains("שופרסל"));
    assert_eq!(rows[0].price, 7.9);
}

#[test]
fn test_extract_empty_document() {
    assert!(extract_store_rows("<html><body></body></html>").is_empty());
}

#[test]
fn test_extract_skips_implausible_rows() {
    let html = r#"
        <table>
          <tr class="line-odd"><td>חנות א</td><td></td><td></td><td></td><td>5000</td></tr>
          <tr class="line-even"><td>חנות ב</td><td></td><td></td><td></td><td>9.90</td></tr>
        </table>"#;

    let rows = extract_store_rows(html);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].store_name, "חנות ב");
}
