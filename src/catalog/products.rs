//! Product queries against the `products` snapshot view.

use std::collections::HashMap;

use crate::error::Result;
use crate::models::ProductRecord;
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// SearchProductsParams
// ---------------------------------------------------------------------------

/// Parameters for the product search.
///
/// All fields are optional. When `None`, the corresponding filter is skipped.
#[derive(Debug, Clone, Default)]
pub struct SearchProductsParams {
    /// Substring match on the canonical name (case-insensitive LIKE).
    pub name: Option<String>,
    /// Jaro-Winkler fuzzy match on the canonical name (threshold 0.8),
    /// ordered by descending similarity.
    pub fuzzy_name: Option<String>,
    /// When `Some(true)`, only rows carrying a promo price; `Some(false)`
    /// only rows without one.
    pub promo: Option<bool>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub supermarket_id: Option<String>,
    pub chain_id: Option<String>,
    pub in_stock: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

// ---------------------------------------------------------------------------
// ProductQuery
// ---------------------------------------------------------------------------

/// Query interface for supermarket products backed by the `products` view.
pub struct ProductQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> ProductQuery<'a> {
    /// Create a new `ProductQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    // -- Single product lookup ---------------------------------------------

    /// Retrieve a single product observation by its catalog id.
    pub fn get_by_id(&self, product_id: &str) -> Result<Option<ProductRecord>> {
        self.conn.ensure_views(&["products"])?;

        let (sql, params) = SqlBuilder::new("products")
            .where_eq("product_id", product_id)
            .limit(1)
            .build();

        let rows: Vec<ProductRecord> = self.conn.execute_into(&sql, &params)?;
        Ok(rows.into_iter().next())
    }

    // -- Barcode lookup ----------------------------------------------------

    /// Get every store's observation of a barcode, cheapest effective price
    /// first, most recent collection first within equal prices.
    pub fn get_by_barcode(&self, barcode: &str) -> Result<Vec<ProductRecord>> {
        self.conn.ensure_views(&["products"])?;

        let (sql, params) = SqlBuilder::new("products")
            .where_eq("barcode", barcode)
            .order_by(&["COALESCE(promo_price, price) ASC", "collected_at DESC"])
            .build();

        self.conn.execute_into(&sql, &params)
    }

    // -- Chain lookup ------------------------------------------------------

    /// All product observations collected at branches of a chain.
    pub fn by_chain(&self, chain_id: &str) -> Result<Vec<ProductRecord>> {
        self.conn.ensure_views(&["products", "stores"])?;

        let (sql, params) = SqlBuilder::new("products")
            .where_clause(
                "supermarket_id IN (SELECT store_id FROM stores WHERE chain_id = ?)",
                &[chain_id],
            )
            .order_by(&["collected_at DESC", "canonical_name ASC"])
            .build();

        self.conn.execute_into(&sql, &params)
    }

    // -- Count -------------------------------------------------------------

    /// Count products, optionally filtered by the supplied column/value pairs.
    pub fn count(&self, filters: &HashMap<String, String>) -> Result<i64> {
        self.conn.ensure_views(&["products"])?;

        let mut qb = SqlBuilder::new("products");
        qb.select(&["COUNT(*) AS cnt"]);

        for (col, val) in filters {
            qb.where_eq(col, val);
        }

        let (sql, params) = qb.build();
        let rows = self.conn.execute(&sql, &params)?;

        let cnt = rows
            .first()
            .and_then(|r| r.get("cnt"))
            .and_then(|v| v.as_i64())
            .unwrap_or(0);

        Ok(cnt)
    }

    // -- Search ------------------------------------------------------------

    /// Search for products using a set of optional filters.
    ///
    /// Results are ordered by collection recency then name, matching the
    /// REST contract; a `fuzzy_name` filter re-orders by similarity instead.
    pub fn search(&self, params: &SearchProductsParams) -> Result<Vec<ProductRecord>> {
        let mut views: Vec<&str> = vec!["products"];
        if params.chain_id.is_some() {
            views.push("stores");
        }
        self.conn.ensure_views(&views)?;

        let mut qb = SqlBuilder::new("products");

        if let Some(ref name) = params.name {
            qb.where_like("canonical_name", &format!("%{}%", name));
        }

        if let Some(ref fuzzy) = params.fuzzy_name {
            qb.where_fuzzy("canonical_name", fuzzy, 0.8);
            qb.order_by_expr(
                "jaro_winkler_similarity(canonical_name, ?) DESC",
                &[fuzzy.as_str()],
            );
        }

        if let Some(promo) = params.promo {
            if promo {
                qb.where_clause("promo_price IS NOT NULL", &[]);
            } else {
                qb.where_clause("promo_price IS NULL", &[]);
            }
        }

        if let Some(min) = params.min_price {
            qb.where_gte("price", &min.to_string());
        }

        if let Some(max) = params.max_price {
            qb.where_lte("price", &max.to_string());
        }

        if let Some(ref sid) = params.supermarket_id {
            qb.where_eq("supermarket_id", sid);
        }

        if let Some(ref cid) = params.chain_id {
            qb.where_clause(
                "supermarket_id IN (SELECT store_id FROM stores WHERE chain_id = ?)",
                &[cid],
            );
        }

        if let Some(in_stock) = params.in_stock {
            qb.where_eq("in_stock", if in_stock { "true" } else { "false" });
        }

        qb.order_by(&["collected_at DESC", "canonical_name ASC"]);

        let limit = params.limit.unwrap_or(100);
        let offset = params.offset.unwrap_or(0);
        qb.limit(limit);
        qb.offset(offset);

        let (sql, sql_params) = qb.build();
        self.conn.execute_into(&sql, &sql_params)
    }
}
