//! # shuk-sdk
//!
//! Rust SDK for Israeli supermarket price data: a DuckDB-backed catalog of
//! daily price snapshots, a live connector for the chp.co.il comparison
//! site, and a basket optimizer that finds the cheapest store for a full
//! shopping list.
//!
//! ## Quick start
//!
//! ```no_run
//! use shuk_sdk::ShukSdk;
//!
//! fn main() -> shuk_sdk::Result<()> {
//!     let sdk = ShukSdk::builder().build()?;
//!
//!     // Catalog queries over the local snapshot
//!     let stores = sdk.stores().chains()?;
//!     println!("{} chains", stores.len());
//!
//!     // Cheapest basket for a shopping list, via the live comparison site
//!     let basket = sdk.basket()?.find_best_basket(
//!         &["חלב 3%".to_string(), "לחם אחיד".to_string()],
//!         "תל אביב",
//!     )?;
//!     for store in &basket.complete {
//!         println!("{}: {:.2} ILS", store.store_name, store.total_price);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Snapshot data is downloaded on first use and cached locally; use
//! [`ShukSdkBuilder::offline`] to work from the cache only.

pub mod basket;
pub mod catalog;
pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod snapshot;
pub mod source;
pub mod sql_builder;
pub mod tools;

#[cfg(feature = "async")]
pub mod async_client;

pub use basket::{calculate_savings, BasketAggregator, SortOrder};
pub use catalog::{ProductQuery, SearchProductsParams, StoreQuery};
pub use connection::Connection;
pub use error::{Result, ShukError};
pub use models::{
    Basket, BasketReport, BasketSummary, ChainSummary, LineItem, ProductCandidate,
    ProductRecord, ResolvedProduct, SavingsReport, StorePriceRow, StoreRecord,
};
pub use snapshot::SnapshotManager;
pub use source::{resolve, CatalogSource, ChpSource, PriceSource};
pub use sql_builder::SqlBuilder;
pub use tools::Tools;

#[cfg(feature = "async")]
pub use async_client::AsyncShukSdk;

use std::path::PathBuf;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ShukSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for [`ShukSdk`].
#[derive(Debug, Clone)]
pub struct ShukSdkBuilder {
    data_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    fallback_prices: bool,
}

impl Default for ShukSdkBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            offline: false,
            timeout: Duration::from_secs(30),
            fallback_prices: false,
        }
    }
}

impl ShukSdkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory for cached snapshot files. Defaults to the platform cache
    /// directory.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Never download; use cached snapshot files only.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// HTTP timeout for snapshot downloads and live comparison requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Emit synthetic, clearly-flagged placeholder prices when the live
    /// source extracts nothing. Off by default.
    pub fn fallback_prices(mut self, enabled: bool) -> Self {
        self.fallback_prices = enabled;
        self
    }

    pub fn build(self) -> Result<ShukSdk> {
        let snapshot = SnapshotManager::new(self.data_dir, self.offline, self.timeout)?;
        let conn = Connection::new(snapshot)?;
        Ok(ShukSdk {
            conn,
            timeout: self.timeout,
            fallback_prices: self.fallback_prices,
        })
    }
}

// ---------------------------------------------------------------------------
// ShukSdk
// ---------------------------------------------------------------------------

/// Main entry point for the SDK.
pub struct ShukSdk {
    conn: Connection,
    timeout: Duration,
    fallback_prices: bool,
}

impl ShukSdk {
    pub fn builder() -> ShukSdkBuilder {
        ShukSdkBuilder::new()
    }

    /// Build with all defaults (online, platform cache directory).
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Product catalog queries.
    pub fn products(&self) -> ProductQuery<'_> {
        ProductQuery::new(&self.conn)
    }

    /// Store and chain queries.
    pub fn stores(&self) -> StoreQuery<'_> {
        StoreQuery::new(&self.conn)
    }

    /// Price source over the local catalog snapshot (offline-capable).
    pub fn price_source(&self) -> CatalogSource<'_> {
        CatalogSource::new(&self.conn)
    }

    /// Live price source backed by chp.co.il.
    pub fn chp(&self) -> Result<ChpSource> {
        ChpSource::new(self.timeout, self.fallback_prices)
    }

    /// Basket aggregator over the live comparison site.
    pub fn basket(&self) -> Result<BasketAggregator<ChpSource>> {
        Ok(BasketAggregator::new(self.chp()?))
    }

    /// Basket aggregator over the local catalog snapshot.
    pub fn basket_offline(&self) -> BasketAggregator<CatalogSource<'_>> {
        BasketAggregator::new(self.price_source())
    }

    /// JSON tool surface over the live comparison site.
    pub fn tools(&self) -> Result<Tools<ChpSource>> {
        Ok(Tools::new(self.chp()?))
    }

    /// Execute raw SQL against the snapshot views.
    pub fn sql(
        &self,
        query: &str,
    ) -> Result<Vec<std::collections::HashMap<String, serde_json::Value>>> {
        self.conn.ensure_views(&["products", "stores"])?;
        self.conn.execute(query, &[])
    }

    /// Names of the currently registered snapshot views.
    pub fn views(&self) -> Vec<String> {
        self.conn.views()
    }

    /// Drop cached snapshot files and re-register views on next access.
    pub fn refresh(&self) -> Result<()> {
        self.conn.snapshot.borrow().clear()?;
        self.conn.reset_views();
        Ok(())
    }

    /// Access the underlying connection wrapper.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl std::fmt::Display for ShukSdk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ShukSdk(data_dir={}, views={})",
            self.conn.snapshot.borrow().data_dir.display(),
            self.views().len()
        )
    }
}
