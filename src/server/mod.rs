//! HTTP prediction service
//!
//! Thin axum layer over the inference engine: the artifact is loaded once
//! before the listener binds, so a missing or corrupt model aborts startup
//! instead of failing per request.

mod error;
mod handlers;
mod state;

pub use error::ServerError;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::inference::InferenceEngine;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            model_path: std::env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("models/model.bin")),
        }
    }
}

/// Build the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    // The original deployment served a browser frontend from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::home))
        .route("/api/health", get(handlers::health))
        .route("/api/predict", post(handlers::predict))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the service with the given configuration.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let engine = InferenceEngine::load(&config.model_path)?;
    let state = Arc::new(AppState::new(engine));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        address = %addr,
        model = %config.model_path.display(),
        "prediction service listening"
    );

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C signal handler");
        info!("shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}
