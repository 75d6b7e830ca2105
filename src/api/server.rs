use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::api::state::AppState;
use crate::core::{AppConfig, logging};

pub fn app(shared_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        // API routes
        .nest("/api", routes::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::clone(&shared_state))
}

// Run the server
pub async fn serve(host: String, port: String, config: AppConfig) -> Result<()> {
    // axum logs rejections from built-in extractors with the `axum::rejection`
    // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
    logging::init(&format!(
        "{}=debug,tower_http=debug,axum::rejection=trace",
        env!("CARGO_CRATE_NAME")
    ));

    for var in config.missing_credentials() {
        tracing::warn!("Missing env var {}, provider calls will be rejected", var);
    }
    tracing::debug!("Loaded config {:?}", config);

    let app_state = AppState::new(config)?;
    let app = app(Arc::new(app_state));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;

    tracing::debug!("Server started. Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
