//! JSON tool surface mirroring the assistant tool contract.
//!
//! Each tool wraps an SDK operation and answers with a `serde_json::Value`
//! suitable for handing to an LLM tool-call runtime verbatim.

use serde_json::{json, Value};

use crate::basket::{calculate_savings, BasketAggregator, SortOrder};
use crate::error::Result;
use crate::models::Basket;
use crate::source::{resolve, PriceSource};

pub struct Tools<S: PriceSource> {
    source: S,
}

impl<S: PriceSource> Tools<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Resolve a product name and list the raw candidates alongside.
    pub fn search_product(&self, name: &str) -> Result<Value> {
        let resolved = resolve(&self.source, name)?;
        let candidates = self.source.search(name)?;
        Ok(json!({
            "query": resolved.query_name,
            "product_id": resolved.product_id,
            "display_name": resolved.display_name,
            "candidates": candidates,
        }))
    }

    /// Per-store prices for a resolved product near a location.
    pub fn compare_results(&self, product_id: &str, location: &str) -> Result<Value> {
        crate::source::validate_compare_args(product_id, location)?;
        let rows = self.source.compare(product_id, location)?;
        Ok(json!({
            "product_id": product_id,
            "location": location,
            "store_count": rows.len(),
            "stores": rows,
        }))
    }

    pub fn find_best_basket(&self, products: &[String], location: &str) -> Result<Value> {
        let report = BasketAggregator::new(&self.source).aggregate(
            products,
            location,
            SortOrder::CheapestFirst,
        )?;
        Ok(serde_json::to_value(report)?)
    }

    /// Like [`Tools::find_best_basket`] with the order flipped. The savings
    /// block is dropped: it reads cheapest-first and would mislead here.
    pub fn find_most_expensive_basket(&self, products: &[String], location: &str) -> Result<Value> {
        let report = BasketAggregator::new(&self.source).aggregate(
            products,
            location,
            SortOrder::MostExpensiveFirst,
        )?;
        let mut value = serde_json::to_value(report)?;
        if let Some(map) = value.as_object_mut() {
            map.remove("savings");
        }
        Ok(value)
    }

    pub fn calculate_savings(&self, a: &Basket, b: &Basket) -> Result<Value> {
        let report = calculate_savings(a, b)?;
        Ok(serde_json::to_value(report)?)
    }
}
