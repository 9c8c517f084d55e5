//! Store-row extraction from comparison-result payloads.
//!
//! The comparison site answers sometimes with JSON and sometimes with an HTML
//! results table, and the table markup has shifted over time. Extraction runs
//! a fixed sequence of strategies over the raw body and returns the first one
//! that produces at least one plausible row.

use regex::Regex;
use scraper::{Html, Selector};

use crate::config::MAX_PLAUSIBLE_PRICE;
use crate::models::StorePriceRow;

/// Strings that appear in price cells but are not prices.
const PRICE_NOISE: &[&str] = &["הכלול במחיר הכללי", "לא זמין", "-"];

/// Extract per-store price rows from an HTML comparison page.
///
/// Strategies are tried in order; the first non-empty result wins.
pub fn extract_store_rows(html: &str) -> Vec<StorePriceRow> {
    let doc = Html::parse_document(html);

    let rows = extract_result_table(&doc);
    if !rows.is_empty() {
        return rows;
    }

    let rows = extract_any_table(&doc);
    if !rows.is_empty() {
        return rows;
    }

    let rows = extract_text_pairs(html, false);
    if !rows.is_empty() {
        return rows;
    }

    extract_text_pairs(html, true)
}

/// The site's own results table: alternating `line-odd` / `line-even` rows
/// with store name, city and price in fixed columns.
fn extract_result_table(doc: &Html) -> Vec<StorePriceRow> {
    let row_sel = match Selector::parse("tr.line-odd, tr.line-even") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };
    let cell_sel = match Selector::parse("td") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut out = Vec::new();
    for tr in doc.select(&row_sel) {
        let cells: Vec<String> = tr
            .select(&cell_sel)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() < 2 {
            continue;
        }

        let store = cells[0].clone();
        if store.is_empty() {
            continue;
        }
        let city = cells.get(2).filter(|c| !c.is_empty()).cloned();

        // Column 4 holds the price in the current layout; older layouts put
        // it elsewhere, so scan the remaining cells when it fails to parse.
        let price = cells
            .get(4)
            .and_then(|c| parse_price(c))
            .or_else(|| cells.iter().skip(1).find_map(|c| parse_price(c)));

        if let Some(price) = price {
            out.push(StorePriceRow {
                store_name: store,
                address: city,
                price,
                is_fallback: false,
            });
        }
    }
    out
}

/// Any table whose rows pair a textual first cell with a parseable price.
fn extract_any_table(doc: &Html) -> Vec<StorePriceRow> {
    let row_sel = match Selector::parse("table tr") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };
    let cell_sel = match Selector::parse("td") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut out = Vec::new();
    for tr in doc.select(&row_sel) {
        let cells: Vec<String> = tr
            .select(&cell_sel)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() < 2 || cells[0].is_empty() {
            continue;
        }
        if let Some(price) = cells.iter().skip(1).find_map(|c| parse_price(c)) {
            out.push(StorePriceRow {
                store_name: cells[0].clone(),
                address: None,
                price,
                is_fallback: false,
            });
        }
    }
    out
}

/// Last resort: shekel-amount patterns in the raw text.
///
/// `reversed` handles markup that renders the amount before the store name.
fn extract_text_pairs(html: &str, reversed: bool) -> Vec<StorePriceRow> {
    let pattern = if reversed {
        r"(?s)₪\s*(\d+(?:[.,]\d+)?)\D{0,40}?([\p{Hebrew}][\p{Hebrew}\w \-]{1,60})"
    } else {
        r"(?s)([\p{Hebrew}][\p{Hebrew}\w \-]{1,60})\D{0,40}?₪\s*(\d+(?:[.,]\d+)?)"
    };
    let re = match Regex::new(pattern) {
        Ok(r) => r,
        Err(_) => return Vec::new(),
    };

    let mut out = Vec::new();
    for cap in re.captures_iter(html) {
        let (name_idx, price_idx) = if reversed { (2, 1) } else { (1, 2) };
        let name = cap[name_idx].trim().to_string();
        if name.is_empty() {
            continue;
        }
        if let Some(price) = parse_price(&cap[price_idx]) {
            out.push(StorePriceRow {
                store_name: name,
                address: None,
                price,
                is_fallback: false,
            });
        }
    }
    out
}

/// Parse a price cell into a plausible shekel amount.
///
/// Returns `None` for noise strings, non-numeric text, and amounts outside
/// `(0, MAX_PLAUSIBLE_PRICE)`.
pub fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || PRICE_NOISE.iter().any(|n| trimmed.contains(n)) {
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    // "1,234.56" drops the thousands separator; "12,34" is a decimal comma.
    let normalized = if cleaned.contains('.') {
        cleaned.replace(',', "")
    } else {
        cleaned.replace(',', ".")
    };

    let value: f64 = normalized.parse().ok()?;
    if value <= 0.0 || value >= MAX_PLAUSIBLE_PRICE {
        return None;
    }
    Some(crate::basket::round2(value))
}
