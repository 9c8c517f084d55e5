use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ProductCandidate — One search hit from a price source
// ---------------------------------------------------------------------------

/// A product search hit, in source relevance order. `id` is whatever the
/// source keys prices by (a barcode for the live comparison site, a catalog
/// product id for the database-backed source).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCandidate {
    pub id: String,
    pub label: String,
}

// ---------------------------------------------------------------------------
// ResolvedProduct — A free-text query pinned to a concrete identifier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedProduct {
    pub query_name: String,
    pub product_id: String,
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// StorePriceRow — One (product, store) price observation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorePriceRow {
    pub store_name: String,
    #[serde(default)]
    pub address: Option<String>,
    /// Normalized to 2 decimal places, always > 0.
    pub price: f64,
    /// True for synthesized placeholder rows; never mixed silently with
    /// real data.
    #[serde(default)]
    pub is_fallback: bool,
}

// ---------------------------------------------------------------------------
// Basket — The requested products priced at a single store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub product: String,
    pub price: f64,
    #[serde(default)]
    pub is_fallback: bool,
}

/// Invariants: `total_price == round2(sum of line item prices)` and
/// `item_count == line_items.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Basket {
    pub store_name: String,
    pub address: String,
    pub line_items: Vec<LineItem>,
    pub total_price: f64,
    pub item_count: usize,
}

// ---------------------------------------------------------------------------
// SavingsReport — Spread between the extreme complete baskets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsReport {
    pub cheapest: Basket,
    pub most_expensive: Basket,
    pub savings_amount: f64,
    /// 1 decimal place, in [0, 100].
    pub savings_percentage: f64,
    /// (cheapest total, most expensive total).
    pub price_range: (f64, f64),
}

// ---------------------------------------------------------------------------
// BasketReport — Full aggregation result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregationErrors {
    pub search: Vec<String>,
    pub comparison: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasketSummary {
    pub products_requested: usize,
    pub products_resolved: usize,
    pub products_priced: usize,
    pub complete_stores: usize,
    pub partial_stores: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasketReport {
    /// Baskets containing every resolved product, capped for display.
    pub complete: Vec<Basket>,
    /// Baskets missing at least one product but containing at least one.
    pub partial: Vec<Basket>,
    /// Present only when at least two complete baskets exist. Computed over
    /// the full complete set, before the display cap.
    pub savings: Option<SavingsReport>,
    pub errors: AggregationErrors,
    pub summary: BasketSummary,
}
