//! Data models shared across the SDK.

pub mod basket;
pub mod product;

pub use basket::{
    AggregationErrors, Basket, BasketReport, BasketSummary, LineItem, ProductCandidate,
    ResolvedProduct, SavingsReport, StorePriceRow,
};
pub use product::{ChainSummary, ProductRecord, StoreRecord};
