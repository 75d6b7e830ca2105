//! Test utilities for integration tests
#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use axum::{Router, body::Body};
use tracing::subscriber::DefaultGuard;

use relaychat::api::AppState;
use relaychat::api::app;
use relaychat::core::AppConfig;

pub const TEST_API_KEY: &str = "sk-test-8f2b1c9d0e7a6b5c4d3e2f1a";
pub const TEST_ORGANIZATION: &str = "org-test-4c3b2a19";

/// Config pointing the provider client at `provider_url` with fake
/// credentials that are easy to search for in output.
pub fn test_config(provider_url: &str) -> AppConfig {
    AppConfig {
        openai_api_hostname: provider_url.to_string(),
        openai_api_key: String::from(TEST_API_KEY),
        openai_organization: String::from(TEST_ORGANIZATION),
        openai_model: String::from("gpt-3.5-turbo"),
        provider_timeout_secs: 5,
    }
}

/// Creates a test application router that relays to `provider_url`.
pub fn test_app(provider_url: &str) -> Router {
    test_app_with_config(test_config(provider_url))
}

pub fn test_app_with_config(config: AppConfig) -> Router {
    let app_state = AppState::new(config).expect("Failed to build app state");
    app(Arc::new(app_state))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf-8")
}

/// A completion envelope like the provider sends back with `content`
/// as the first choice.
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

/// Collects everything written by the tracing subscriber installed by
/// `capture_logs`.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's tracing output into a buffer until the guard
/// is dropped. Works with the default single threaded `#[tokio::test]`
/// runtime.
pub fn capture_logs() -> (LogCapture, DefaultGuard) {
    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            "relaychat=trace,tower_http=trace",
        ))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
