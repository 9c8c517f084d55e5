use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StoresQuery {
    pub city: Option<String>,
}

/// GET /stores?city=תל אביב
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<StoresQuery>,
) -> Result<Json<Value>, AppError> {
    let stores = state
        .sdk
        .run(move |sdk| match query.city {
            Some(city) => sdk.stores().in_city(&city),
            None => sdk.stores().list(),
        })
        .await?;

    Ok(Json(json!({
        "count": stores.len(),
        "stores": stores,
    })))
}

/// GET /stores/chains
pub async fn chains(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let chains = state.sdk.run(|sdk| sdk.stores().chains()).await?;
    Ok(Json(json!({
        "count": chains.len(),
        "chains": chains,
    })))
}
