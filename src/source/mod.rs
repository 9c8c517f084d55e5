//! Price source abstraction.
//!
//! A [`PriceSource`] resolves a product name to candidate identifiers and a
//! product identifier plus location to per-store price rows. The basket
//! aggregation core depends only on this trait; the backing implementation
//! may be the local catalog ([`CatalogSource`]) or the live comparison site
//! ([`ChpSource`]).

pub mod catalog;
pub mod chp;
pub mod extract;

pub use catalog::CatalogSource;
pub use chp::ChpSource;

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, ShukError};
use crate::models::{ProductCandidate, ResolvedProduct};

static PERCENT_MARKER: OnceLock<Regex> = OnceLock::new();

fn percent_marker() -> &'static Regex {
    PERCENT_MARKER.get_or_init(|| Regex::new(r"(\d+)\s*%").expect("valid pattern"))
}

/// Abstract boundary supplying product search and price-comparison data.
pub trait PriceSource {
    /// Resolve a free-text product name to candidate identifiers, in source
    /// relevance order.
    fn search(&self, query: &str) -> Result<Vec<ProductCandidate>>;

    /// Per-store price rows for a product identifier near a location.
    fn compare(&self, product_id: &str, location: &str)
        -> Result<Vec<crate::models::StorePriceRow>>;
}

impl<T: PriceSource + ?Sized> PriceSource for &T {
    fn search(&self, query: &str) -> Result<Vec<ProductCandidate>> {
        (**self).search(query)
    }

    fn compare(
        &self,
        product_id: &str,
        location: &str,
    ) -> Result<Vec<crate::models::StorePriceRow>> {
        (**self).compare(product_id, location)
    }
}

/// Reject empty comparison arguments before any source is contacted. An
/// empty location must never widen a comparison to every city.
pub(crate) fn validate_compare_args(product_id: &str, location: &str) -> Result<()> {
    if product_id.trim().is_empty() {
        return Err(ShukError::InvalidArgument(
            "product id is required for comparison".to_string(),
        ));
    }
    if location.trim().is_empty() {
        return Err(ShukError::InvalidArgument(
            "location is required for comparison".to_string(),
        ));
    }
    Ok(())
}

/// Resolve one product query against a price source.
///
/// Empty input is rejected before the source is contacted. Zero candidates
/// yields `NotFound`; batch callers record it and continue with the
/// remaining queries.
pub fn resolve(source: &dyn PriceSource, query: &str) -> Result<ResolvedProduct> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ShukError::InvalidArgument(
            "product name is required for search".to_string(),
        ));
    }

    let candidates = source.search(trimmed)?;
    if candidates.is_empty() {
        return Err(ShukError::NotFound(format!(
            "no search results for: {}",
            trimmed
        )));
    }

    let best = pick_candidate(trimmed, &candidates);
    Ok(ResolvedProduct {
        query_name: trimmed.to_string(),
        product_id: best.id.clone(),
        display_name: best.label.clone(),
    })
}

/// Selection policy over source-ordered candidates.
///
/// A substring tie-break, not similarity scoring: an explicit percentage
/// figure in the query (e.g. "3%") wins first; then a qualifier token of the
/// query appearing in a candidate label; otherwise the source's first
/// candidate stands.
pub(crate) fn pick_candidate<'c>(
    query: &str,
    candidates: &'c [ProductCandidate],
) -> &'c ProductCandidate {
    // Percentage marker (e.g. "חלב 3%")
    if let Some(cap) = percent_marker().captures(query) {
        let marker = format!("{}%", &cap[1]);
        if let Some(hit) = candidates.iter().find(|c| c.label.contains(&marker)) {
            return hit;
        }
    }

    // Qualifier tokens: everything after the leading product noun
    for token in query.split_whitespace().skip(1) {
        if token.chars().count() < 2 || token.contains('%') {
            continue;
        }
        if let Some(hit) = candidates.iter().find(|c| c.label.contains(token)) {
            return hit;
        }
    }

    &candidates[0]
}
