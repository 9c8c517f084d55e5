//! Store and chain queries against the `stores` snapshot view.

use crate::error::Result;
use crate::models::{ChainSummary, StoreRecord};
use crate::sql_builder::SqlBuilder;

/// Query interface for supermarket branches backed by the `stores` view.
pub struct StoreQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> StoreQuery<'a> {
    /// Create a new `StoreQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// List every known branch, ordered by chain then branch name.
    pub fn list(&self) -> Result<Vec<StoreRecord>> {
        self.conn.ensure_views(&["stores"])?;

        let (sql, params) = SqlBuilder::new("stores")
            .order_by(&["chain_name ASC", "store_name ASC"])
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Retrieve a single branch by its store id.
    pub fn get(&self, store_id: &str) -> Result<Option<StoreRecord>> {
        self.conn.ensure_views(&["stores"])?;

        let (sql, params) = SqlBuilder::new("stores")
            .where_eq("store_id", store_id)
            .limit(1)
            .build();

        let rows: Vec<StoreRecord> = self.conn.execute_into(&sql, &params)?;
        Ok(rows.into_iter().next())
    }

    /// Branches whose city matches the given location substring.
    pub fn in_city(&self, city: &str) -> Result<Vec<StoreRecord>> {
        self.conn.ensure_views(&["stores"])?;

        let (sql, params) = SqlBuilder::new("stores")
            .where_like("city", &format!("%{}%", city))
            .order_by(&["chain_name ASC", "store_name ASC"])
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Summarize chains with their branch counts.
    pub fn chains(&self) -> Result<Vec<ChainSummary>> {
        self.conn.ensure_views(&["stores"])?;

        let (sql, params) = SqlBuilder::new("stores")
            .select(&["chain_id", "chain_name", "COUNT(*) AS store_count"])
            .group_by(&["chain_id", "chain_name"])
            .order_by(&["chain_name ASC"])
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Total number of known branches.
    pub fn count(&self) -> Result<i64> {
        self.conn.ensure_views(&["stores"])?;

        let rows = self
            .conn
            .execute("SELECT COUNT(*) AS cnt FROM stores", &[])?;
        Ok(rows
            .first()
            .and_then(|r| r.get("cnt"))
            .and_then(|v| v.as_i64())
            .unwrap_or(0))
    }
}
