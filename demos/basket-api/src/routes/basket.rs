use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use shuk_sdk::async_client::{
    find_best_basket_concurrent, find_most_expensive_basket_concurrent,
};
use shuk_sdk::{calculate_savings, resolve, Basket, PriceSource};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct BasketRequest {
    pub products: Vec<String>,
    pub location: String,
}

/// POST /basket/best
pub async fn best(
    State(state): State<AppState>,
    Json(req): Json<BasketRequest>,
) -> Result<Json<Value>, AppError> {
    let report =
        find_best_basket_concurrent(Arc::clone(&state.chp), req.products, req.location).await?;
    Ok(Json(serde_json::to_value(report).map_err(shuk_sdk::ShukError::from)?))
}

/// POST /basket/most-expensive
pub async fn most_expensive(
    State(state): State<AppState>,
    Json(req): Json<BasketRequest>,
) -> Result<Json<Value>, AppError> {
    let report =
        find_most_expensive_basket_concurrent(Arc::clone(&state.chp), req.products, req.location)
            .await?;

    // the savings block reads cheapest-first and would mislead here
    let mut value = serde_json::to_value(report).map_err(shuk_sdk::ShukError::from)?;
    if let Some(map) = value.as_object_mut() {
        map.remove("savings");
    }
    Ok(Json(value))
}

#[derive(Deserialize)]
pub struct CompareQuery {
    pub product: String,
    pub location: String,
}

/// GET /compare?product=חלב 3%&location=תל אביב
pub async fn compare(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<Value>, AppError> {
    let chp = Arc::clone(&state.chp);
    let result = tokio::task::spawn_blocking(move || {
        let resolved = resolve(chp.as_ref(), &query.product)?;
        let rows = chp.compare(&resolved.product_id, &query.location)?;
        Ok::<_, shuk_sdk::ShukError>((resolved, rows))
    })
    .await
    .map_err(|e| AppError::bad_request(format!("task failed: {}", e)))?;

    let (resolved, rows) = result?;
    Ok(Json(json!({
        "product": resolved,
        "store_count": rows.len(),
        "stores": rows,
    })))
}

#[derive(Deserialize)]
pub struct SavingsRequest {
    pub basket_a: Basket,
    pub basket_b: Basket,
}

/// POST /savings
pub async fn savings(
    Json(req): Json<SavingsRequest>,
) -> Result<Json<Value>, AppError> {
    let report = calculate_savings(&req.basket_a, &req.basket_b)?;
    Ok(Json(serde_json::to_value(report).map_err(shuk_sdk::ShukError::from)?))
}
