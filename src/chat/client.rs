//! Client side of the relay: posts a transcript to
//! `/api/ai/conversation` and decodes the assistant's reply.
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::{ChatTurn, Role};

#[derive(Debug, Error)]
pub enum RelayTransportError {
    #[error("relay unreachable: {0}")]
    Unreachable(String),

    #[error("relay responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed relay response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait RelayClient {
    /// Send the full transcript and get back the assistant's reply.
    async fn converse(&self, messages: &[ChatTurn]) -> Result<ChatTurn, RelayTransportError>;
}

#[derive(Serialize)]
struct ConversationRequest<'a> {
    messages: &'a [ChatTurn],
}

#[derive(Deserialize)]
struct ReplyBody {
    #[allow(dead_code)]
    role: Role,
    content: String,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

pub struct HttpRelayClient {
    relay_url: String,
    http: reqwest::Client,
}

impl HttpRelayClient {
    pub fn new(relay_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            relay_url: relay_url.to_string(),
            http,
        })
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn converse(&self, messages: &[ChatTurn]) -> Result<ChatTurn, RelayTransportError> {
        let url = format!(
            "{}/api/ai/conversation",
            self.relay_url.trim_end_matches("/")
        );
        let response = self
            .http
            .post(url)
            .json(&ConversationRequest { messages })
            .send()
            .await
            .map_err(|e| RelayTransportError::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayTransportError::Unreachable(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(RelayTransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let reply = serde_json::from_str::<ReplyBody>(&body)
            .map_err(|e| RelayTransportError::Malformed(e.to_string()))?;
        if reply.content.is_empty() {
            return Err(RelayTransportError::Malformed(String::from(
                "reply has no content",
            )));
        }

        // Whatever the relay says, its reply is the assistant's turn
        Ok(ChatTurn::assistant(&reply.content))
    }
}
