use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use shuk_sdk::SearchProductsParams;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub promo: Option<bool>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub chain_id: Option<String>,
    pub in_stock: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// GET /products?q=חלב&promo=true&limit=20
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    let params = SearchProductsParams {
        name: query.q,
        promo: query.promo,
        min_price: query.min_price,
        max_price: query.max_price,
        chain_id: query.chain_id,
        in_stock: query.in_stock,
        limit: query.limit,
        offset: query.offset,
        ..Default::default()
    };

    let products = state
        .sdk
        .run(move |sdk| sdk.products().search(&params))
        .await?;

    Ok(Json(json!({
        "count": products.len(),
        "products": products,
    })))
}

/// GET /products/{barcode}
pub async fn by_barcode(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> Result<Json<Value>, AppError> {
    let rows = state
        .sdk
        .run(move |sdk| sdk.products().get_by_barcode(&barcode))
        .await?;

    if rows.is_empty() {
        return Err(AppError {
            status: axum::http::StatusCode::NOT_FOUND,
            message: "barcode not found".to_string(),
        });
    }

    Ok(Json(json!({
        "count": rows.len(),
        "observations": rows,
    })))
}
