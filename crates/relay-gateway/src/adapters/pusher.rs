//! Pusher Channels adapter.
//!
//! Implements the [`Publisher`] port over the Pusher HTTP API
//! (`POST /apps/{app_id}/events`). Requests are signed with HMAC-SHA256 over
//! the method, path and sorted query string; the body is bound to the
//! signature through its MD5 digest.

use crate::domain::{PublishError, PusherConfig};
use crate::ports::outbound::{Publisher, SystemTimeSource, TimeSource};
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use serde::Serialize;
use sha2::Sha256;
use std::sync::Arc;
use tracing::{debug, warn};

type HmacSha256 = Hmac<Sha256>;

/// Max size of the `data` field accepted by the service
pub const MAX_DATA_SIZE: usize = 10_240;
/// Max length of channel and event names
pub const MAX_NAME_LEN: usize = 200;
const AUTH_VERSION: &str = "1.0";

#[derive(Serialize)]
struct TriggerBody<'a> {
    name: &'a str,
    channels: [&'a str; 1],
    data: String,
}

/// Publisher backed by the Pusher HTTP API.
pub struct PusherPublisher {
    config: PusherConfig,
    client: reqwest::Client,
    clock: Arc<dyn TimeSource>,
}

impl PusherPublisher {
    /// Build a publisher. Credentials are not checked until the first publish.
    pub fn new(config: PusherConfig) -> Result<Self, PublishError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            config,
            client,
            clock: Arc::new(SystemTimeSource),
        })
    }

    /// Replace the clock used for `auth_timestamp`.
    pub fn with_time_source(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    fn events_path(&self) -> String {
        format!("/apps/{}/events", self.config.app_id)
    }

    /// Signed query parameters for a request with the given body.
    fn signed_query(&self, path: &str, body: &[u8]) -> Result<Vec<(&'static str, String)>, PublishError> {
        // Already in sorted key order
        let mut params = vec![
            ("auth_key", self.config.key.clone()),
            ("auth_timestamp", self.clock.now().to_string()),
            ("auth_version", AUTH_VERSION.to_string()),
            ("body_md5", body_md5(body)),
        ];

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        let to_sign = format!("POST\n{}\n{}", path, query);
        params.push(("auth_signature", sign(&self.config.secret, &to_sign)?));

        Ok(params)
    }
}

#[async_trait]
impl Publisher for PusherPublisher {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), PublishError> {
        let missing = self.config.missing_credentials();
        if !missing.is_empty() {
            return Err(PublishError::Credentials(missing.join(", ")));
        }
        validate_channel(channel)?;
        validate_event(event)?;

        // Strings go through untouched, everything else is JSON encoded
        let data = match payload {
            serde_json::Value::String(s) => s,
            other => serde_json::to_string(&other)?,
        };
        if data.len() > MAX_DATA_SIZE {
            return Err(PublishError::PayloadTooLarge {
                size: data.len(),
                limit: MAX_DATA_SIZE,
            });
        }

        let body = serde_json::to_vec(&TriggerBody {
            name: event,
            channels: [channel],
            data,
        })?;
        let path = self.events_path();
        let query = self.signed_query(&path, &body)?;
        let url = format!("{}{}", self.config.base_url(), path);

        let response = self
            .client
            .post(&url)
            .query(&query)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(channel, event, error = %e, "Broadcast request failed");
                PublishError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(channel, event, status = status.as_u16(), "Broadcast rejected event");
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(channel, event, "Published event");
        Ok(())
    }
}

/// Hex MD5 of the request body.
pub fn body_md5(body: &[u8]) -> String {
    hex::encode(Md5::digest(body))
}

/// Hex HMAC-SHA256 of `message` keyed by `secret`.
pub fn sign(secret: &str, message: &str) -> Result<String, PublishError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| PublishError::Credentials(e.to_string()))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

fn validate_channel(channel: &str) -> Result<(), PublishError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || "-_=@,.;".contains(c);
    if channel.is_empty() || channel.len() > MAX_NAME_LEN || !channel.chars().all(allowed) {
        return Err(PublishError::InvalidChannel(channel.to_string()));
    }
    Ok(())
}

fn validate_event(event: &str) -> Result<(), PublishError> {
    if event.is_empty() || event.len() > MAX_NAME_LEN {
        return Err(PublishError::InvalidEvent(event.to_string()));
    }
    Ok(())
}
