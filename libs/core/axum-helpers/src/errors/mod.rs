pub mod handlers;

use serde::Serialize;
use utoipa::ToSchema;

/// Standard JSON error envelope for infrastructure endpoints.
///
/// - `error`: machine-readable identifier (e.g. "NotFound")
/// - `message`: human-readable description
/// - `details`: optional structured context
///
/// ```json
/// {
///   "error": "NotFound",
///   "message": "The requested resource was not found",
///   "details": null
/// }
/// ```
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
