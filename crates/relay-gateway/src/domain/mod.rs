//! Domain types for the signal relay.
//!
//! Signals, the response envelope, configuration, and error handling.
//! Network I/O lives in the adapters layer.

pub mod config;
pub mod envelope;
pub mod error;
pub mod signals;

// Re-exports for convenience
pub use config::{ConfigError, CorsConfig, HttpConfig, LimitsConfig, PusherConfig, RelayConfig};
pub use envelope::{ResponseEnvelope, Status};
pub use error::{GatewayError, PublishError, RelayError, RelayResult};
pub use signals::{
    IceCandidate, SessionOffer, Signal, StartSignal, CONTROL_CHANNEL, SIGNALING_CHANNEL,
};
