//! Signal Relay Gateway - POST endpoints that forward WebRTC signaling to a
//! managed broadcast service.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          SIGNAL RELAY                            │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   /api/start-agent    /api/webrtc-offer    /api/webrtc-candidate │
//! │          │                    │                     │            │
//! │   ┌──────┴────────────────────┴─────────────────────┴──────┐     │
//! │   │            Middleware: CORS → Tracing → BodyLimit       │     │
//! │   └──────────────────────────┬──────────────────────────────┘     │
//! │                              │                                   │
//! │   ┌──────────────────────────┴──────────────────────────────┐    │
//! │   │    relay::<Signal>: method → decode → publish → envelope │    │
//! │   └──────────────────────────┬──────────────────────────────┘    │
//! │                              │ Publisher port                    │
//! └──────────────────────────────┼───────────────────────────────────┘
//!                                ▼
//!                   Pusher HTTP API (or in-memory recorder)
//! ```
//!
//! # Endpoints
//!
//! | Path | Channel | Event | Payload |
//! |------|---------|-------|---------|
//! | `/api/start-agent` | `control` | `start` | `null` |
//! | `/api/webrtc-offer` | `webrtc-signaling` | `offer` | `{sdp, type}` |
//! | `/api/webrtc-candidate` | `webrtc-signaling` | `candidate` | `{candidate, sdpMid, sdpMLineIndex}` |
//!
//! Non-POST → 405, undecodable body → 400, publish failure → 500 with
//! `{"status":"error","error":...}`, success → 200 `{"status":"ok"}`.
//!
//! # Usage
//!
//! ```ignore
//! use relay_gateway::{PusherPublisher, RelayConfig, RelayService};
//!
//! let config = RelayConfig::from_env();
//! let publisher = Arc::new(PusherPublisher::new(config.pusher.clone())?);
//! RelayService::new(config, publisher)?
//!     .serve(async { let _ = tokio::signal::ctrl_c().await; })
//!     .await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod middleware;
pub mod ports;
pub mod relay;
pub mod service;

// Re-exports for public API
pub use adapters::{PublishedEvent, PusherPublisher, RecordingPublisher};
pub use domain::config::RelayConfig;
pub use domain::envelope::{ResponseEnvelope, Status};
pub use domain::error::{GatewayError, PublishError, RelayError, RelayResult};
pub use domain::signals::{IceCandidate, SessionOffer, Signal, StartSignal};
pub use ports::outbound::Publisher;
pub use relay::{relay, RelayState, CANDIDATE_PATH, OFFER_PATH, START_PATH};
pub use service::RelayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
