//! Outbound ports for the signal relay.

use crate::domain::PublishError;
use async_trait::async_trait;

/// Broadcast service the relay forwards signals to.
///
/// One call publishes one event on one channel. Implementations must not
/// retry: a failure is reported to the caller as-is.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), PublishError>;
}

/// Time source trait for testability
pub trait TimeSource: Send + Sync {
    /// Seconds since the Unix epoch
    fn now(&self) -> u64;
}

/// System time implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            // Clock before Unix epoch - return 0 rather than panic
            .unwrap_or(0)
    }
}
