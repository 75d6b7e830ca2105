use std::env;
use std::fmt;

#[derive(Clone)]
pub struct AppConfig {
    pub openai_api_hostname: String,
    pub openai_api_key: String,
    pub openai_organization: String,
    pub openai_model: String,
    pub provider_timeout_secs: u64,
}

impl AppConfig {
    /// Names of credentials that are required by the provider but
    /// were not set. Missing values don't stop the server from
    /// starting, the first provider call fails instead.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.openai_api_key.is_empty() {
            missing.push("OPENAI_API_KEY");
        }
        missing
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let openai_api_hostname = env::var("RELAYCHAT_LLM_HOST")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let openai_organization = env::var("OPENAI_ORGANIZATION").unwrap_or_default();
        let openai_model =
            env::var("RELAYCHAT_LLM_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());
        let provider_timeout_secs = env::var("RELAYCHAT_PROVIDER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        Self {
            openai_api_hostname,
            openai_api_key,
            openai_organization,
            openai_model,
            provider_timeout_secs,
        }
    }
}

// Secrets never show up in logs, even when the whole config is printed
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("openai_api_hostname", &self.openai_api_hostname)
            .field("openai_api_key", &"[redacted]")
            .field("openai_organization", &"[redacted]")
            .field("openai_model", &self.openai_model)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            openai_api_hostname: String::from("https://api.openai.com"),
            openai_api_key: String::from("sk-very-secret"),
            openai_organization: String::from("org-very-secret"),
            openai_model: String::from("gpt-3.5-turbo"),
            provider_timeout_secs: 60,
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let printed = format!("{:?}", config());
        assert!(!printed.contains("sk-very-secret"));
        assert!(!printed.contains("org-very-secret"));
        assert!(printed.contains("gpt-3.5-turbo"));
    }

    #[test]
    fn test_missing_credentials() {
        let mut config = config();
        assert!(config.missing_credentials().is_empty());

        config.openai_api_key = String::new();
        assert_eq!(config.missing_credentials(), vec!["OPENAI_API_KEY"]);
    }
}
