//! Relay service - HTTP entry point.
//!
//! Owns the validated configuration and the injected publisher, builds the
//! router, and serves it until a shutdown signal arrives.

use crate::domain::config::RelayConfig;
use crate::domain::error::GatewayError;
use crate::domain::signals::{IceCandidate, SessionOffer, StartSignal};
use crate::middleware::{create_cors_layer, TracingLayer};
use crate::ports::outbound::Publisher;
use crate::relay::{relay_handler, RelayState, CANDIDATE_PATH, OFFER_PATH, START_PATH};
use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get},
    Json, Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::info;

/// Signal relay service
pub struct RelayService {
    config: RelayConfig,
    publisher: Arc<dyn Publisher>,
}

impl RelayService {
    /// Create a new relay service around an already constructed publisher
    pub fn new(config: RelayConfig, publisher: Arc<dyn Publisher>) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        Ok(Self { config, publisher })
    }

    /// Build the HTTP router with its middleware stack
    pub fn router(&self) -> Router {
        let state = RelayState::new(Arc::clone(&self.publisher));

        let middleware = ServiceBuilder::new()
            .layer(create_cors_layer(&self.config.cors))
            .layer(TracingLayer::new())
            .layer(DefaultBodyLimit::max(self.config.limits.max_body_size));

        Router::new()
            .route(START_PATH, any(relay_handler::<StartSignal>))
            .route(OFFER_PATH, any(relay_handler::<SessionOffer>))
            .route(CANDIDATE_PATH, any(relay_handler::<IceCandidate>))
            .route("/health", get(health_check))
            .layer(middleware)
            .with_state(state)
    }

    /// Bind the configured address and serve until `shutdown` resolves
    pub async fn serve<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", addr, e)))?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an existing listener until `shutdown` resolves
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router();
        if let Ok(addr) = listener.local_addr() {
            info!(addr = %addr, "Starting signal relay");
        }

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Serve(e.to_string()))?;

        info!("Signal relay stopped");
        Ok(())
    }
}

/// Liveness probe
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}
