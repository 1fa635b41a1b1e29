//! Decode-then-relay operation shared by every signaling endpoint.
//!
//! Flow per request: validate method → decode body → publish → respond.
//! The endpoints differ only in the [`Signal`] type they are instantiated with.

use crate::domain::{PublishError, RelayError, RelayResult, ResponseEnvelope, Signal};
use crate::ports::outbound::Publisher;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::Method,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::debug;

/// Route of the start-signal endpoint
pub const START_PATH: &str = "/api/start-agent";
/// Route of the offer relay endpoint
pub const OFFER_PATH: &str = "/api/webrtc-offer";
/// Route of the candidate relay endpoint
pub const CANDIDATE_PATH: &str = "/api/webrtc-candidate";

/// State shared across relay handlers
#[derive(Clone)]
pub struct RelayState {
    pub publisher: Arc<dyn Publisher>,
}

impl RelayState {
    pub fn new(publisher: Arc<dyn Publisher>) -> Self {
        Self { publisher }
    }
}

/// Relay one request for signal type `S`.
///
/// Nothing is published unless the method is POST and the body decodes.
/// Signals without [`Signal::READS_BODY`] never look at the body, so an
/// unreadable or oversized one does not stop them.
/// A publish failure is returned as-is; there is no retry.
pub async fn relay<S: Signal>(
    publisher: &dyn Publisher,
    method: &Method,
    body: Result<Bytes, BytesRejection>,
) -> RelayResult<()> {
    if *method != Method::POST {
        return Err(RelayError::MethodNotAllowed);
    }

    let signal = if S::READS_BODY {
        S::decode(&body?)?
    } else {
        S::decode(&[])?
    };
    let payload = serde_json::to_value(&signal).map_err(PublishError::from)?;

    publisher.publish(S::CHANNEL, S::EVENT, payload).await?;

    debug!(channel = S::CHANNEL, event = S::EVENT, "Relayed signal");
    Ok(())
}

/// Axum handler wrapping [`relay`] with the JSON envelope.
pub async fn relay_handler<S: Signal>(
    State(state): State<RelayState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match relay::<S>(state.publisher.as_ref(), &method, body).await {
        Ok(()) => Json(ResponseEnvelope::ok()).into_response(),
        Err(e) => e.into_response(),
    }
}
