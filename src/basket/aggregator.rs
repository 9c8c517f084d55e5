//! Multi-product basket aggregation over a [`PriceSource`].

use std::collections::BTreeMap;

use crate::basket::{calculate_savings, round2};
use crate::config::{BASKET_DISPLAY_CAP, UNKNOWN_ADDRESS};
use crate::error::{Result, ShukError};
use crate::models::{
    AggregationErrors, Basket, BasketReport, BasketSummary, LineItem, ResolvedProduct,
    StorePriceRow,
};
use crate::source::{resolve, PriceSource};

/// Basket ordering: cheapest-first for the best-basket operation,
/// most-expensive-first for its inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    CheapestFirst,
    MostExpensiveFirst,
}

/// Outcome of the per-product fetch phase. Failures are carried as data so
/// one bad product never aborts the whole basket.
pub(crate) enum FetchOutcome {
    Fetched {
        resolved: ResolvedProduct,
        rows: Vec<StorePriceRow>,
    },
    SearchFailed {
        query: String,
        error: String,
    },
    CompareFailed {
        resolved: ResolvedProduct,
        error: String,
    },
}

/// Resolve one product query and fetch its per-store rows.
pub(crate) fn fetch_one<S: PriceSource>(source: &S, query: &str, location: &str) -> FetchOutcome {
    let resolved = match resolve(source, query) {
        Ok(r) => r,
        Err(e) => {
            return FetchOutcome::SearchFailed {
                query: query.to_string(),
                error: e.to_string(),
            }
        }
    };

    match source.compare(&resolved.product_id, location) {
        Ok(rows) if !rows.is_empty() => FetchOutcome::Fetched { resolved, rows },
        Ok(_) => {
            let error = format!("no store prices for: {}", resolved.display_name);
            FetchOutcome::CompareFailed { resolved, error }
        }
        Err(e) => {
            let error = format!("{}: {}", resolved.display_name, e);
            FetchOutcome::CompareFailed { resolved, error }
        }
    }
}

/// Fold per-product fetch outcomes into the final basket report.
///
/// Complete baskets are those containing every resolved product; a product
/// whose comparison failed still counts in that denominator. Savings are
/// taken over the full complete set before the display cap.
pub(crate) fn assemble(
    outcomes: Vec<FetchOutcome>,
    requested: usize,
    order: SortOrder,
    cap: usize,
) -> Result<BasketReport> {
    let mut errors = AggregationErrors::default();
    let mut resolved_count = 0usize;
    let mut priced_count = 0usize;
    let mut baskets: BTreeMap<String, Basket> = BTreeMap::new();

    for outcome in outcomes {
        match outcome {
            FetchOutcome::SearchFailed { query, error } => {
                errors.search.push(format!("{}: {}", query, error));
            }
            FetchOutcome::CompareFailed { error, .. } => {
                resolved_count += 1;
                errors.comparison.push(error);
            }
            FetchOutcome::Fetched { resolved, rows } => {
                resolved_count += 1;
                priced_count += 1;
                fold_rows(&mut baskets, &resolved, rows);
            }
        }
    }

    if resolved_count == 0 {
        return Err(ShukError::NoProductsFound(errors.search));
    }
    if baskets.is_empty() {
        return Err(ShukError::NoPriceData(errors.comparison));
    }

    let mut complete = Vec::new();
    let mut partial = Vec::new();
    for basket in baskets.into_values() {
        if basket.item_count == resolved_count {
            complete.push(basket);
        } else {
            partial.push(basket);
        }
    }
    sort_baskets(&mut complete, order);
    sort_baskets(&mut partial, order);

    let savings = if complete.len() >= 2 {
        // complete is sorted, so the extremes sit at the ends
        Some(calculate_savings(&complete[0], &complete[complete.len() - 1])?)
    } else {
        None
    };

    let summary = BasketSummary {
        products_requested: requested,
        products_resolved: resolved_count,
        products_priced: priced_count,
        complete_stores: complete.len(),
        partial_stores: partial.len(),
    };

    complete.truncate(cap);
    partial.truncate(cap);

    Ok(BasketReport {
        complete,
        partial,
        savings,
        errors,
        summary,
    })
}

/// Fold one product's store rows into the per-store basket map, keeping the
/// cheapest row per store for this product.
fn fold_rows(
    baskets: &mut BTreeMap<String, Basket>,
    resolved: &ResolvedProduct,
    rows: Vec<StorePriceRow>,
) {
    let mut cheapest: BTreeMap<String, StorePriceRow> = BTreeMap::new();
    for row in rows {
        match cheapest.get(&row.store_name) {
            Some(existing) if existing.price <= row.price => {}
            _ => {
                cheapest.insert(row.store_name.clone(), row);
            }
        }
    }

    for (store_name, row) in cheapest {
        let basket = baskets.entry(store_name.clone()).or_insert_with(|| Basket {
            store_name,
            address: row
                .address
                .clone()
                .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string()),
            line_items: Vec::new(),
            total_price: 0.0,
            item_count: 0,
        });

        if basket.address == UNKNOWN_ADDRESS {
            if let Some(addr) = &row.address {
                basket.address = addr.clone();
            }
        }

        basket.line_items.push(LineItem {
            product: resolved.display_name.clone(),
            price: row.price,
            is_fallback: row.is_fallback,
        });
        basket.total_price = round2(basket.total_price + row.price);
        basket.item_count = basket.line_items.len();
    }
}

fn sort_baskets(baskets: &mut [Basket], order: SortOrder) {
    baskets.sort_by(|a, b| {
        let by_total = match order {
            SortOrder::CheapestFirst => a.total_price.total_cmp(&b.total_price),
            SortOrder::MostExpensiveFirst => b.total_price.total_cmp(&a.total_price),
        };
        by_total.then_with(|| a.store_name.cmp(&b.store_name))
    });
}

// ---------------------------------------------------------------------------
// BasketAggregator
// ---------------------------------------------------------------------------

/// Runs the full basket flow against any [`PriceSource`].
pub struct BasketAggregator<S: PriceSource> {
    source: S,
}

impl<S: PriceSource> BasketAggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Cheapest baskets first.
    pub fn find_best_basket(&self, products: &[String], location: &str) -> Result<BasketReport> {
        self.aggregate(products, location, SortOrder::CheapestFirst)
    }

    /// Most expensive baskets first.
    pub fn find_most_expensive_basket(
        &self,
        products: &[String],
        location: &str,
    ) -> Result<BasketReport> {
        self.aggregate(products, location, SortOrder::MostExpensiveFirst)
    }

    /// Aggregate store baskets for the requested products near a location.
    pub fn aggregate(
        &self,
        products: &[String],
        location: &str,
        order: SortOrder,
    ) -> Result<BasketReport> {
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

        let outcomes: Vec<FetchOutcome> = products
            .iter()
            .map(|p| fetch_one(&self.source, p, location))
            .collect();

        assemble(outcomes, products.len(), order, BASKET_DISPLAY_CAP)
    }
}
