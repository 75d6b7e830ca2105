use std::time::Duration;

use thiserror::Error;

/// Failures talking to the completion provider.
///
/// Messages are redacted by the client before they are stored here so
/// they are safe to log and return to callers.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider rejected the configured credentials: {0}")]
    Unauthorized(String),

    #[error("provider rate limit or quota exceeded: {0}")]
    RateLimited(String),

    #[error("provider rejected the request: {0}")]
    InvalidRequest(String),

    #[error("provider returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("provider did not respond within {0:?}")]
    Timeout(Duration),

    #[error("could not reach provider: {0}")]
    Transport(String),

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Classify a non-2xx provider response.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ProviderError::Unauthorized(message),
            429 => ProviderError::RateLimited(message),
            400 | 404 | 422 => ProviderError::InvalidRequest(message),
            _ => ProviderError::Upstream { status, message },
        }
    }

    /// Stable machine readable name used in the relay's error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Unauthorized(_) => "unauthorized",
            ProviderError::RateLimited(_) => "rate_limited",
            ProviderError::InvalidRequest(_) => "invalid_request",
            ProviderError::Upstream { .. } => "upstream",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::Transport(_) => "transport",
            ProviderError::MalformedResponse(_) => "malformed_response",
        }
    }
}
