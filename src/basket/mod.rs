//! Basket aggregation: fold per-product price rows into per-store baskets,
//! split complete from partial, and compute the savings spread.

pub mod aggregator;
pub mod savings;

pub use aggregator::{BasketAggregator, SortOrder};
pub use savings::calculate_savings;

/// Round to 2 decimal places (monetary amounts).
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Round to 1 decimal place (percentages).
pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
