//! Adapters for the signal relay.
//!
//! Implementations of the outbound [`Publisher`](crate::ports::Publisher) port.

pub mod pusher;
pub mod recording;

pub use pusher::PusherPublisher;
pub use recording::{PublishedEvent, RecordingPublisher};
