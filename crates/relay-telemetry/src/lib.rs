//! # Relay Telemetry
//!
//! Structured logging for the signal relay, built on `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relay_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RELAY_SERVICE_NAME` | `signal-relay` | Service name in the startup log |
//! | `RELAY_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `RELAY_JSON_LOGS` | `false` (`true` in containers) | JSON output |

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::build_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize structured logging.
///
/// Returns a guard to hold for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    tracing_setup::init_tracing(&config)?;

    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry");
    }
}
