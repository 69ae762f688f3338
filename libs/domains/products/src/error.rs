use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that abort a product query as a whole.
///
/// Per-record shape problems are not errors - they are skipped during
/// flattening. Anything that reaches this type is fatal to the request.
#[derive(Debug, Error)]
pub enum ProductError {
    /// Store query or result decode failure
    #[error("{0}")]
    Database(String),

    /// The query deadline elapsed
    #[error("product query timed out after {0}s")]
    Timeout(u64),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        tracing::error!("product query failed: {}", self);
        // 500 with the raw error text as a plain string body, not the JSON
        // envelope used elsewhere.
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}
