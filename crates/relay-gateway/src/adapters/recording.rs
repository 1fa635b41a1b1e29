//! In-memory publisher that records every call.
//!
//! Used wherever the broadcast service must be observed or made to fail
//! without a network: handler tests, router tests, local dry runs.

use crate::domain::PublishError;
use crate::ports::outbound::Publisher;
use async_trait::async_trait;
use parking_lot::Mutex;

/// One recorded publish call.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedEvent {
    pub channel: String,
    pub event: String,
    pub payload: serde_json::Value,
}

/// Publisher that stores calls instead of sending them.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<PublishedEvent>>,
    failure: Mutex<Option<String>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publisher whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let publisher = Self::new();
        publisher.fail_with(message);
        publisher
    }

    /// Make subsequent calls fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }

    /// Make subsequent calls succeed again.
    pub fn succeed(&self) {
        *self.failure.lock() = None;
    }

    /// Snapshot of recorded calls, oldest first.
    pub fn events(&self) -> Vec<PublishedEvent> {
        self.events.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.events.lock().len()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), PublishError> {
        self.events.lock().push(PublishedEvent {
            channel: channel.to_string(),
            event: event.to_string(),
            payload,
        });

        match self.failure.lock().clone() {
            Some(message) => Err(PublishError::Transport(message)),
            None => Ok(()),
        }
    }
}
