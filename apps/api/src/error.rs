//! API error types and their HTTP mapping.
//!
//! ## Error Flow
//! ```text
//! CoreError / DbError / GatewayError
//!        │
//!        ▼
//!     ApiError  ──IntoResponse──►  (status, {"error": "..."})
//! ```
//!
//! The webhook handler deliberately does NOT use this type for its
//! acknowledgement path: gateway deliveries are answered 200 even when the
//! referenced order is missing, so the gateway stops retrying.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sartor_core::CoreError;
use sartor_db::DbError;
use serde_json::json;
use tracing::error;

use crate::gateway::GatewayError;

/// API-level error, carrying the HTTP status it maps to.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Requested entity does not exist. Maps to 404.
    #[error("{0}")]
    NotFound(String),

    /// Request payload failed validation. Maps to 400.
    #[error("{0}")]
    BadRequest(String),

    /// An upstream service (Resend, Hugging Face) failed. Maps to 502.
    #[error("{0}")]
    Upstream(String),

    /// The payment gateway failed or rejected a transaction. Maps to 500,
    /// with the gateway's message surfaced so the operator can act on it.
    #[error("{0}")]
    Gateway(String),

    /// The image model is still loading. Maps to 503 so the caller can
    /// retry, mirroring the upstream response.
    #[error("Model is loading, please try again in a moment")]
    ModelLoading,

    /// Anything else. Maps to 500 with a generic message; the detail goes
    /// to the log, not the client.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Gateway(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ModelLoading => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code, next to the human-readable message.
    fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "VALIDATION",
            ApiError::Upstream(_) => "UPSTREAM_UNAVAILABLE",
            ApiError::Gateway(_) => "GATEWAY_ERROR",
            ApiError::ModelLoading => "MODEL_LOADING",
            ApiError::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        // Internal details are logged, never surfaced.
        let message = match &self {
            ApiError::Internal(detail) => {
                error!(detail = %detail, "Internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "code": code, "error": message }))).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{entity} not found: {id}"))
            }
            DbError::UniqueViolation { field, .. } => {
                ApiError::BadRequest(format!("Duplicate value for {field}"))
            }
            DbError::ForeignKeyViolation { message } => ApiError::BadRequest(message),
            DbError::CheckViolation { message } => ApiError::BadRequest(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownStatus(value) => {
                ApiError::BadRequest(format!("Unknown status: {value}"))
            }
            CoreError::Validation(err) => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError::Gateway(err.to_string())
    }
}

/// Result alias for handler functions.
pub type ApiResult<T> = Result<T, ApiError>;
