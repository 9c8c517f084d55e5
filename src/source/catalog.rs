//! Price source backed by the local DuckDB catalog snapshot.
//!
//! Fully offline once the snapshot is on disk. Candidate ids are barcodes so
//! that a resolved product compares across every chain carrying it.

use crate::connection::Connection;
use crate::error::Result;
use crate::models::{ProductCandidate, StorePriceRow};
use crate::source::{validate_compare_args, PriceSource};

pub struct CatalogSource<'a> {
    conn: &'a Connection,
}

impl<'a> CatalogSource<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl PriceSource for CatalogSource<'_> {
    fn search(&self, query: &str) -> Result<Vec<ProductCandidate>> {
        self.conn.ensure_views(&["products"])?;

        let rows = self.conn.execute(
            "SELECT barcode, canonical_name \
             FROM products \
             WHERE canonical_name LIKE ? \
             ORDER BY collected_at DESC, canonical_name ASC \
             LIMIT 50",
            &[format!("%{}%", query)],
        )?;

        // One candidate per barcode, keeping the most recent observation.
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for row in rows {
            let barcode = row
                .get("barcode")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let name = row
                .get("canonical_name")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            if barcode.is_empty() || name.is_empty() || !seen.insert(barcode.clone()) {
                continue;
            }
            out.push(ProductCandidate {
                id: barcode,
                label: name,
            });
        }
        Ok(out)
    }

    fn compare(&self, product_id: &str, location: &str) -> Result<Vec<StorePriceRow>> {
        validate_compare_args(product_id, location)?;
        self.conn.ensure_views(&["products", "stores"])?;

        let rows = self.conn.execute(
            "SELECT s.store_name, s.address, s.city, \
                    COALESCE(p.promo_price, p.price) AS effective_price \
             FROM products p \
             JOIN stores s ON p.supermarket_id = s.store_id \
             WHERE p.barcode = ? AND LOWER(s.city) LIKE LOWER(?) \
             ORDER BY effective_price ASC",
            &[product_id.to_string(), format!("%{}%", location)],
        )?;

        let mut out = Vec::new();
        for row in rows {
            let store = row
                .get("store_name")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let Some(price) = row.get("effective_price").and_then(|v| v.as_f64()) else {
                continue;
            };
            if store.is_empty() || price <= 0.0 {
                continue;
            }
            let address = row
                .get("address")
                .and_then(|v| v.as_str())
                .or_else(|| row.get("city").and_then(|v| v.as_str()))
                .map(str::to_string);
            out.push(StorePriceRow {
                store_name: store,
                address,
                price: crate::basket::round2(price),
                is_fallback: false,
            });
        }
        Ok(out)
    }
}
