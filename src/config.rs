use std::collections::HashMap;
use std::path::PathBuf;

/// Base URL for published daily catalog snapshots.
pub const SNAPSHOT_BASE: &str = "https://data.shuk-prices.dev/v1";
pub const META_URL: &str = "https://data.shuk-prices.dev/v1/meta.json";

/// chp.co.il endpoints used by the live price source.
pub const CHP_SEARCH_URL: &str = "https://chp.co.il/autocompletion/product_extended";
pub const CHP_COMPARE_URL: &str = "https://chp.co.il/main_page/compare_results";

/// Prices at or above this are treated as extraction noise, not data.
pub const MAX_PLAUSIBLE_PRICE: f64 = 1000.0;

/// Display cap on the complete/partial basket lists. Savings are computed
/// over the full set before this cap is applied.
pub const BASKET_DISPLAY_CAP: usize = 5;

/// Sentinel used when a price source has no address for a store.
pub const UNKNOWN_ADDRESS: &str = "unknown";

/// Well-known chains used for synthetic fallback rows when extraction
/// yields nothing and fallback pricing is enabled.
pub const FALLBACK_STORES: [&str; 3] = ["שופרסל", "רמי לוי", "מגה"];

/// Synthetic fallback prices are drawn uniformly from this range (ILS).
pub const FALLBACK_PRICE_RANGE: (f64, f64) = (6.0, 14.0);

pub fn parquet_files() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("products", "parquet/products.parquet"),
        ("stores", "parquet/stores.parquet"),
    ])
}

pub fn ndjson_files() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("products", "ndjson/products.ndjson.gz"),
        ("stores", "ndjson/stores.ndjson.gz"),
    ])
}

pub fn default_data_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("shuk-sdk")
    } else {
        PathBuf::from(".shuk-sdk-cache")
    }
}
