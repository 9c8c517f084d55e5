use serde::{Deserialize, Serialize};

fn default_currency() -> String {
    "ILS".to_string()
}

// ---------------------------------------------------------------------------
// ProductRecord — One collected price observation for a product at a store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: String,
    pub supermarket_id: String,
    pub barcode: String,
    pub canonical_name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub size_value: Option<f64>,
    #[serde(default)]
    pub size_unit: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub promo_price: Option<f64>,
    #[serde(default)]
    pub promo_text: Option<String>,
    #[serde(default)]
    pub in_stock: bool,
    /// ISO-8601 collection timestamp from the crawler pipeline.
    pub collected_at: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl ProductRecord {
    /// Price actually paid at the shelf: the promo price when one exists.
    pub fn effective_price(&self) -> f64 {
        self.promo_price.unwrap_or(self.price)
    }
}

// ---------------------------------------------------------------------------
// StoreRecord — A physical supermarket branch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreRecord {
    pub store_id: String,
    pub chain_id: String,
    pub chain_name: String,
    pub store_name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub city: String,
}

// ---------------------------------------------------------------------------
// ChainSummary — Aggregated per-chain branch count
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSummary {
    pub chain_id: String,
    pub chain_name: String,
    pub store_count: i64,
}
