mod core;
mod error;

pub use self::core::{BoxedCompletionProvider, CompletionProvider, OpenAiClient};
pub use self::error::ProviderError;
