//! Error types for the screenshot service
//!
//! Provides unified error handling using thiserror. Note that the coordinator
//! never surfaces these to its callers: collaborator errors degrade to an
//! "unavailable" result there.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Service Error Enum ==
/// Unified error type for the screenshot service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A streaming or imaging backend failed to answer properly
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A backend call exceeded its deadline
    #[error("Timed out after {0}ms")]
    Timeout(u64),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Upstream(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the screenshot service.
pub type Result<T> = std::result::Result<T, ServiceError>;
