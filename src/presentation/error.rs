// API errors and their HTTP mapping
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("failed to encode response: {0}")]
    Encoding(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidFilter(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Encoding(_) => {
                tracing::error!(error = %self, "Response encoding failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
