//! Catalog query interfaces over the DuckDB-backed snapshot data.

pub mod products;
pub mod stores;

pub use products::{ProductQuery, SearchProductsParams};
pub use stores::StoreQuery;
