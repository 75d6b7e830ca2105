use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::ProviderError;
use crate::chat::ChatTurn;
use crate::core::AppConfig;

const REDACTED: &str = "[redacted]";

/// Anything that can turn a transcript into the assistant's next turn.
#[async_trait]
pub trait CompletionProvider {
    async fn complete(&self, messages: &[ChatTurn]) -> Result<ChatTurn, ProviderError>;
}

pub type BoxedCompletionProvider = Box<dyn CompletionProvider + Send + Sync + 'static>;

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
}

// Only the parts of the completion envelope we rely on. Everything
// else (id, usage, finish_reason, ...) is ignored.
#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct UpstreamErrorDetail {
    message: String,
}

#[derive(Deserialize)]
struct UpstreamError {
    error: UpstreamErrorDetail,
}

/// Client for an OpenAI compatible chat completions API.
///
/// Holds the credential and organization so callers never see them.
pub struct OpenAiClient {
    api_hostname: String,
    api_key: String,
    organization: String,
    model: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.provider_timeout_secs);
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_hostname: config.openai_api_hostname.clone(),
            api_key: config.openai_api_key.clone(),
            organization: config.openai_organization.clone(),
            model: config.openai_model.clone(),
            timeout,
            http,
        })
    }

    /// Scrub the credential and organization from text that came back
    /// from the provider or the HTTP stack.
    fn redact(&self, text: &str) -> String {
        let mut out = text.to_string();
        for secret in [&self.api_key, &self.organization] {
            if !secret.is_empty() {
                out = out.replace(secret.as_str(), REDACTED);
            }
        }
        out
    }

    fn transport_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else {
            ProviderError::Transport(self.redact(&err.to_string()))
        }
    }

    fn status_error(&self, status: u16, body: &str) -> ProviderError {
        // Prefer the provider's own explanation when it sends one
        let message = match serde_json::from_str::<UpstreamError>(body) {
            Ok(upstream) => upstream.error.message,
            Err(_) if body.trim().is_empty() => format!("empty body with status {}", status),
            Err(_) => body.to_string(),
        };
        ProviderError::from_status(status, self.redact(&message))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, messages: &[ChatTurn]) -> Result<ChatTurn, ProviderError> {
        let payload = CompletionRequest {
            model: &self.model,
            messages,
        };
        let url = format!("{}/v1/chat/completions", self.api_hostname.trim_end_matches("/"));
        let mut request = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(&payload);
        if !self.organization.is_empty() {
            request = request.header("OpenAI-Organization", &self.organization);
        }

        tracing::debug!("Sending {} messages to model {}", messages.len(), self.model);

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(self.status_error(status.as_u16(), &body));
        }

        let completion = serde_json::from_str::<CompletionResponse>(&body)
            .map_err(|e| ProviderError::MalformedResponse(self.redact(&e.to_string())))?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::MalformedResponse(String::from(
                "response contained no choices",
            )))?;

        match choice.message.content {
            Some(content) if !content.is_empty() => Ok(ChatTurn::assistant(&content)),
            _ => Err(ProviderError::MalformedResponse(String::from(
                "first choice has no message content",
            ))),
        }
    }
}
