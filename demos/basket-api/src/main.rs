//! Small REST API over shuk-sdk: catalog search, live price comparison and
//! basket optimization.
//!
//! Run with `cargo run` and try:
//!
//! ```sh
//! curl 'localhost:3000/products?q=חלב&limit=5'
//! curl 'localhost:3000/stores/chains'
//! curl -X POST localhost:3000/basket/best \
//!   -H 'content-type: application/json' \
//!   -d '{"products":["חלב 3%","לחם אחיד"],"location":"תל אביב"}'
//! ```

mod error;
mod routes;
mod state;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;

use state::AppState;

#[tokio::main]
async fn main() {
    let state = match AppState::new().await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to initialize SDK: {}", e);
            std::process::exit(1);
        }
    };

    let app = Router::new()
        .route("/", get(root))
        .route("/products", get(routes::products::search))
        .route("/products/{barcode}", get(routes::products::by_barcode))
        .route("/stores", get(routes::stores::list))
        .route("/stores/chains", get(routes::stores::chains))
        .route("/compare", get(routes::basket::compare))
        .route("/basket/best", post(routes::basket::best))
        .route("/basket/most-expensive", post(routes::basket::most_expensive))
        .route("/savings", post(routes::basket::savings))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = "0.0.0.0:3000";
    println!("basket-api listening on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "name": "basket-api",
        "endpoints": [
            "GET  /products?q=&promo=&min_price=&max_price=&chain_id=&in_stock=&limit=&offset=",
            "GET  /products/{barcode}",
            "GET  /stores?city=",
            "GET  /stores/chains",
            "GET  /compare?product=&location=",
            "POST /basket/best            {products, location}",
            "POST /basket/most-expensive  {products, location}",
            "POST /savings                {basket_a, basket_b}",
        ],
    }))
}
