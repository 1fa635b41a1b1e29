//! # Signal Relay Runtime
//!
//! Wires the relay together for a single process:
//!
//! 1. Load configuration from the environment
//! 2. Construct the broadcast publisher once (credentials read here, checked on publish)
//! 3. Serve the relay endpoints until a shutdown signal arrives

use std::sync::Arc;

use anyhow::{Context, Result};
use relay_gateway::{Publisher, PusherPublisher, RelayConfig, RelayService};
use tracing::{info, warn};

/// Load configuration, logging what the process will use.
pub fn load_config() -> RelayConfig {
    let config = RelayConfig::from_env();

    let missing = config.pusher.missing_credentials();
    if !missing.is_empty() {
        // Not fatal: publish calls report the error per request
        warn!(missing = ?missing, "Broadcast credentials incomplete");
    }

    info!(
        addr = %config.http_addr(),
        broadcast_host = %config.pusher.api_host(),
        "Configuration loaded"
    );
    config
}

/// Build the publisher from configuration.
pub fn build_publisher(config: &RelayConfig) -> Result<Arc<dyn Publisher>> {
    let publisher = PusherPublisher::new(config.pusher.clone())
        .context("Failed to build broadcast client")?;
    Ok(Arc::new(publisher))
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}

/// Run the relay with the given configuration until shutdown.
pub async fn run(config: RelayConfig) -> Result<()> {
    let publisher = build_publisher(&config)?;
    let service = RelayService::new(config, publisher).context("Invalid relay configuration")?;

    service
        .serve(shutdown_signal())
        .await
        .context("Relay server failed")?;

    Ok(())
}
