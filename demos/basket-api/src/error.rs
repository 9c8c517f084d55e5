use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shuk_sdk::ShukError;

/// API error carrying an HTTP status and a client-facing message.
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ShukError> for AppError {
    fn from(err: ShukError) -> Self {
        let status = match &err {
            ShukError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ShukError::NotFound(_) | ShukError::NoProductsFound(_) => StatusCode::NOT_FOUND,
            ShukError::NoPriceData(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
