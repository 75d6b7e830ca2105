use anyhow::Result;

use crate::core::AppConfig;
use crate::openai::{BoxedCompletionProvider, OpenAiClient};

/// Everything a relay handler needs. Built once at startup and never
/// mutated afterwards.
pub struct AppState {
    pub config: AppConfig,
    pub provider: BoxedCompletionProvider,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let provider = Box::new(OpenAiClient::new(&config)?);
        Ok(Self::new_with_provider(config, provider))
    }

    pub fn new_with_provider(config: AppConfig, provider: BoxedCompletionProvider) -> Self {
        Self { config, provider }
    }
}
