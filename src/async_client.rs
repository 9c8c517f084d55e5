//! Async wrapper for use inside tokio applications.
//!
//! DuckDB and the blocking HTTP client must not run on the async executor,
//! so every operation is shipped to the blocking pool via
//! `tokio::task::spawn_blocking`. Enabled with the `async` feature.

use std::sync::{Arc, Mutex};

use crate::basket::aggregator::{assemble, fetch_one};
use crate::basket::SortOrder;
use crate::config::BASKET_DISPLAY_CAP;
use crate::error::{Result, ShukError};
use crate::models::BasketReport;
use crate::source::PriceSource;
use crate::{ShukSdk, ShukSdkBuilder};

/// Clonable async handle around a blocking [`ShukSdk`].
#[derive(Clone)]
pub struct AsyncShukSdk {
    inner: Arc<Mutex<ShukSdk>>,
}

impl AsyncShukSdk {
    /// Build with defaults on the blocking pool.
    pub async fn new() -> Result<Self> {
        Self::from_builder(ShukSdkBuilder::new()).await
    }

    pub async fn from_builder(builder: ShukSdkBuilder) -> Result<Self> {
        let sdk = tokio::task::spawn_blocking(move || builder.build())
            .await
            .map_err(|e| ShukError::InvalidArgument(format!("Task join error: {}", e)))??;
        Ok(Self {
            inner: Arc::new(Mutex::new(sdk)),
        })
    }

    pub fn from_sdk(sdk: ShukSdk) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sdk)),
        }
    }

    /// Run a closure against the SDK on the blocking pool.
    ///
    /// The SDK mutex is held for the duration of the closure, so keep the
    /// work inside short-lived.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ShukSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let sdk = inner
                .lock()
                .map_err(|e| ShukError::InvalidArgument(format!("Lock poisoned: {}", e)))?;
            f(&sdk)
        })
        .await
        .map_err(|e| ShukError::InvalidArgument(format!("Task join error: {}", e)))?
    }

    /// Execute raw SQL against the snapshot views.
    pub async fn sql(
        &self,
        query: impl Into<String>,
    ) -> Result<Vec<std::collections::HashMap<String, serde_json::Value>>> {
        let query = query.into();
        self.run(move |sdk| sdk.sql(&query)).await
    }

    pub async fn views(&self) -> Result<Vec<String>> {
        self.run(|sdk| Ok(sdk.views())).await
    }

    pub async fn refresh(&self) -> Result<()> {
        self.run(|sdk| sdk.refresh()).await
    }
}

// ---------------------------------------------------------------------------
// Concurrent basket aggregation
// ---------------------------------------------------------------------------

/// Aggregate baskets with the per-product fetches running concurrently.
///
/// Each product is resolved and compared on its own blocking task; assembly
/// waits on all of them, so per-product failures surface in the report
/// rather than aborting the batch. Outcome order follows the input order.
pub async fn aggregate_concurrent<S>(
    source: Arc<S>,
    products: Vec<String>,
    location: String,
    order: SortOrder,
) -> Result<BasketReport>
where
    S: PriceSource + Send + Sync + 'static,
{
    if products.is_empty() {
        return Err(ShukError::InvalidArgument(
            "at least one product is required".to_string(),
        ));
    }
    if location.trim().is_empty() {
        return Err(ShukError::InvalidArgument(
            "location is required".to_string(),
        ));
    }

    let mut handles = Vec::with_capacity(products.len());
    for product in &products {
        let source = Arc::clone(&source);
        let product = product.clone();
        let location = location.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            fetch_one(source.as_ref(), &product, &location)
        }));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        let outcome = handle
            .await
            .map_err(|e| ShukError::InvalidArgument(format!("Task join error: {}", e)))?;
        outcomes.push(outcome);
    }

    assemble(outcomes, products.len(), order, BASKET_DISPLAY_CAP)
}

/// Cheapest baskets first, fetched concurrently.
pub async fn find_best_basket_concurrent<S>(
    source: Arc<S>,
    products: Vec<String>,
    location: String,
) -> Result<BasketReport>
where
    S: PriceSource + Send + Sync + 'static,
{
    aggregate_concurrent(source, products, location, SortOrder::CheapestFirst).await
}

/// Most expensive baskets first, fetched concurrently.
pub async fn find_most_expensive_basket_concurrent<S>(
    source: Arc<S>,
    products: Vec<String>,
    location: String,
) -> Result<BasketReport>
where
    S: PriceSource + Send + Sync + 'static,
{
    aggregate_concurrent(source, products, location, SortOrder::MostExpensiveFirst).await
}
