//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::openai::ProviderError;

// Errors

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorDetail {
    pub kind: String,
    pub message: String,
}

/// Body of every non-2xx response from the relay.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        let status = match &err {
            ProviderError::Unauthorized(_) => StatusCode::BAD_GATEWAY,
            ProviderError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ProviderError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProviderError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ProviderError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ProviderError::Transport(_) => StatusCode::BAD_GATEWAY,
            ProviderError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        tracing::error!("{} ({}): {}", self.status, self.kind, self.message);

        let body = ErrorResponse {
            error: ErrorDetail {
                kind: self.kind.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

// Re-export public types from each route

pub mod ai {
    pub use crate::api::routes::ai::public::*;
}
