//! Live price source backed by the chp.co.il comparison site.

use std::time::Duration;

use rand::Rng;
use reqwest::blocking::Client;
use serde_json::Value;

use crate::config::{
    CHP_COMPARE_URL, CHP_SEARCH_URL, FALLBACK_PRICE_RANGE, FALLBACK_STORES,
};
use crate::error::Result;
use crate::models::{ProductCandidate, StorePriceRow};
use crate::source::extract::{extract_store_rows, parse_price};
use crate::source::{validate_compare_args, PriceSource};

/// Price source that queries chp.co.il over HTTP.
///
/// Comparison responses may be JSON or an HTML results page; both are
/// handled. With `fallback_prices` enabled, an empty extraction yields
/// synthetic rows flagged `is_fallback` instead of an empty result.
pub struct ChpSource {
    client: Client,
    fallback_prices: bool,
}

impl ChpSource {
    pub fn new(timeout: Duration, fallback_prices: bool) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36")
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            fallback_prices,
        })
    }
}

/// Synthetic placeholder rows for the well-known chains, prices drawn from
/// the configured range. Every row is flagged `is_fallback` so the marker
/// survives into basket line items.
pub fn synthetic_rows() -> Vec<StorePriceRow> {
    let mut rng = rand::thread_rng();
    let (lo, hi) = FALLBACK_PRICE_RANGE;
    FALLBACK_STORES
        .iter()
        .map(|store| StorePriceRow {
            store_name: (*store).to_string(),
            address: None,
            price: crate::basket::round2(rng.gen_range(lo..hi)),
            is_fallback: true,
        })
        .collect()
}

impl PriceSource for ChpSource {
    fn search(&self, query: &str) -> Result<Vec<ProductCandidate>> {
        let body: Value = self
            .client
            .get(CHP_SEARCH_URL)
            .query(&[("term", query), ("from", "0")])
            .header("Accept", "application/json")
            .send()?
            .error_for_status()?
            .json()?;

        Ok(candidates_from_json(&body))
    }

    fn compare(&self, product_id: &str, location: &str) -> Result<Vec<StorePriceRow>> {
        validate_compare_args(product_id, location)?;

        let body = self
            .client
            .get(CHP_COMPARE_URL)
            .query(&[
                ("product_barcode", product_id),
                ("shopping_address", location),
                ("product_name_or_barcode", product_id),
                ("from", "0"),
                ("num_results", "30"),
            ])
            .header("Accept", "text/html,application/json")
            .header("Accept-Language", "he-IL,he;q=0.9,en;q=0.8")
            .send()?
            .error_for_status()?
            .text()?;

        let rows = match serde_json::from_str::<Value>(&body) {
            Ok(json) => rows_from_json(&json),
            Err(_) => extract_store_rows(&body),
        };

        if rows.is_empty() && self.fallback_prices {
            return Ok(synthetic_rows());
        }
        Ok(rows)
    }
}

/// Autocompletion hits: an array of objects keyed `id`/`value`/`barcode`
/// and `label`/`value`, or a bare string array.
fn candidates_from_json(body: &Value) -> Vec<ProductCandidate> {
    let items = match body {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("results").and_then(|v| v.as_array()) {
            Some(items) => items.as_slice(),
            None => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    let mut out = Vec::new();
    for item in items {
        match item {
            Value::String(s) if !s.is_empty() => out.push(ProductCandidate {
                id: s.clone(),
                label: s.clone(),
            }),
            Value::Object(map) => {
                let label = ["label", "value", "name"]
                    .iter()
                    .find_map(|k| map.get(*k).and_then(|v| v.as_str()));
                let id = ["id", "barcode", "value"]
                    .iter()
                    .find_map(|k| map.get(*k))
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    });
                if let (Some(label), Some(id)) = (label, id) {
                    if !id.is_empty() {
                        out.push(ProductCandidate {
                            id,
                            label: label.to_string(),
                        });
                    }
                }
            }
            _ => {}
        }
    }
    out
}

/// JSON comparison payloads vary; rows may sit at the top level or under a
/// `stores`/`results`/`data` envelope, with loosely named fields.
fn rows_from_json(body: &Value) -> Vec<StorePriceRow> {
    let items = match body {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => {
            match ["stores", "results", "data"]
                .iter()
                .find_map(|k| map.get(*k).and_then(|v| v.as_array()))
            {
                Some(items) => items.as_slice(),
                None => return Vec::new(),
            }
        }
        _ => return Vec::new(),
    };

    let mut out = Vec::new();
    for item in items {
        let Some(map) = item.as_object() else { continue };

        let store = ["store", "store_name", "name", "chain"]
            .iter()
            .find_map(|k| map.get(*k).and_then(|v| v.as_str()))
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let price = ["price", "cost", "amount"].iter().find_map(|k| {
            map.get(*k).and_then(|v| match v {
                Value::Number(n) => n.as_f64().and_then(|f| parse_price(&f.to_string())),
                Value::String(s) => parse_price(s),
                _ => None,
            })
        });

        let address = ["city", "address", "location"]
            .iter()
            .find_map(|k| map.get(*k).and_then(|v| v.as_str()))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        if let (Some(store), Some(price)) = (store, price) {
            out.push(StorePriceRow {
                store_name: store.to_string(),
                address,
                price,
                is_fallback: false,
            });
        }
    }
    out
}
