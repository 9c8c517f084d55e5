#[derive(Debug, thiserror::Error)]
pub enum ShukError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Every product query in a basket request failed to resolve.
    /// Carries the per-query resolution errors.
    #[error("no products could be resolved: {}", .0.join("; "))]
    NoProductsFound(Vec<String>),

    /// Every resolved product failed price comparison (zero stores priced).
    #[error("no price data could be retrieved: {}", .0.join("; "))]
    NoPriceData(Vec<String>),
}

pub type Result<T> = std::result::Result<T, ShukError>;
