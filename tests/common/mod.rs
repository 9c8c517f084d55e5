//! Shared test fixtures: a small snapshot database loaded from NDJSON and a
//! deterministic in-memory price source.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;

use shuk_sdk::models::{ProductCandidate, StorePriceRow};
use shuk_sdk::{PriceSource, Result, ShukSdk};

/// Build an offline SDK with `products` and `stores` views loaded from
/// NDJSON fixtures written into a temp directory.
pub fn setup_sample_db() -> (ShukSdk, TempDir) {
    let dir = TempDir::new().unwrap();

    let products = r#"{"product_id":"p1","supermarket_id":"s1","barcode":"7290000000001","canonical_name":"חלב תנובה 3% 1 ליטר","price":5.9,"promo_price":null,"in_stock":true,"collected_at":"2026-08-25T06:00:00Z","currency":"ILS"}
{"product_id":"p2","supermarket_id":"s2","barcode":"7290000000001","canonical_name":"חלב תנובה 3% 1 ליטר","price":6.4,"promo_price":5.5,"in_stock":true,"collected_at":"2026-08-25T06:05:00Z","currency":"ILS"}
{"product_id":"p3","supermarket_id":"s3","barcode":"7290000000001","canonical_name":"חלב תנובה 3% 1 ליטר","price":6.1,"promo_price":null,"in_stock":false,"collected_at":"2026-08-24T06:00:00Z","currency":"ILS"}
{"product_id":"p4","supermarket_id":"s1","barcode":"7290000000002","canonical_name":"לחם אחיד פרוס","price":7.2,"promo_price":null,"in_stock":true,"collected_at":"2026-08-25T06:00:00Z","currency":"ILS"}
{"product_id":"p5","supermarket_id":"s2","barcode":"7290000000002","canonical_name":"לחם אחיד פרוס","price":6.8,"promo_price":null,"in_stock":true,"collected_at":"2026-08-25T06:05:00Z","currency":"ILS"}
{"product_id":"p6","supermarket_id":"s1","barcode":"7290000000003","canonical_name":"קוטג' תנובה 5%","price":5.2,"promo_price":4.9,"in_stock":true,"collected_at":"2026-08-25T06:00:00Z","currency":"ILS"}"#;

    let stores = r#"{"store_id":"s1","chain_id":"c1","chain_name":"שופרסל","store_name":"שופרסל דיל תל אביב","address":"דרך נמיר 12","city":"תל אביב"}
{"store_id":"s2","chain_id":"c2","chain_name":"רמי לוי","store_name":"רמי לוי תל אביב","address":"דרך ההגנה 3","city":"תל אביב"}
{"store_id":"s3","chain_id":"c1","chain_name":"שופרסל","store_name":"שופרסל חיפה","address":"שדרות הנשיא 20","city":"חיפה"}"#;

    let products_path = dir.path().join("products.ndjson");
    let stores_path = dir.path().join("stores.ndjson");
    fs::write(&products_path, products).unwrap();
    fs::write(&stores_path, stores).unwrap();

    let sdk = ShukSdk::builder()
        .data_dir(dir.path())
        .offline(true)
        .build()
        .unwrap();

    sdk.connection()
        .register_table_from_ndjson("products", products_path.to_str().unwrap())
        .unwrap();
    sdk.connection()
        .register_table_from_ndjson("stores", stores_path.to_str().unwrap())
        .unwrap();

    (sdk, dir)
}

/// Deterministic price source with canned search and comparison answers.
#[derive(Default)]
pub struct MockSource {
    candidates: HashMap<String, Vec<ProductCandidate>>,
    prices: HashMap<String, Vec<StorePriceRow>>,
    pub search_calls: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidate(mut self, query: &str, id: &str, label: &str) -> Self {
        self.candidates
            .entry(query.to_string())
            .or_default()
            .push(ProductCandidate {
                id: id.to_string(),
                label: label.to_string(),
            });
        self
    }

    pub fn with_price(self, id: &str, store: &str, address: Option<&str>, price: f64) -> Self {
        self.with_row(id, store, address, price, false)
    }

    pub fn with_fallback_price(self, id: &str, store: &str, price: f64) -> Self {
        self.with_row(id, store, None, price, true)
    }

    fn with_row(
        mut self,
        id: &str,
        store: &str,
        address: Option<&str>,
        price: f64,
        is_fallback: bool,
    ) -> Self {
        self.prices
            .entry(id.to_string())
            .or_default()
            .push(StorePriceRow {
                store_name: store.to_string(),
                address: address.map(str::to_string),
                price,
                is_fallback,
            });
        self
    }
}

impl PriceSource for MockSource {
    fn search(&self, query: &str) -> Result<Vec<ProductCandidate>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.candidates.get(query).cloned().unwrap_or_default())
    }

    fn compare(&self, product_id: &str, _location: &str) -> Result<Vec<StorePriceRow>> {
        Ok(self.prices.get(product_id).cloned().unwrap_or_default())
    }
}
