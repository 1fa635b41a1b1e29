//! Signaling messages carried across the relay.
//!
//! Each message type knows the fixed (channel, event) pair it is published on
//! and how it is decoded from a request body. Contents are opaque: SDP and ICE
//! strings are never inspected, only required to be present.

use crate::domain::error::RelayResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Channel carrying agent control events
pub const CONTROL_CHANNEL: &str = "control";
/// Channel carrying WebRTC negotiation messages
pub const SIGNALING_CHANNEL: &str = "webrtc-signaling";

/// A message that can be relayed to the broadcast service.
pub trait Signal: Serialize + Sized + Send + 'static {
    /// Channel the message is published on
    const CHANNEL: &'static str;
    /// Event name the message is published under
    const EVENT: &'static str;
    /// Whether the request body is buffered and passed to [`decode`](Self::decode).
    /// When false the body is never read, so its size does not matter.
    const READS_BODY: bool = true;

    /// Build the message from a raw request body.
    fn decode(body: &[u8]) -> RelayResult<Self>;
}

/// Strict JSON decoding shared by the payload-bearing signals.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> RelayResult<T> {
    Ok(serde_json::from_slice(body)?)
}

/// Sentinel telling the agent to start. Published with a `null` payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StartSignal;

impl Signal for StartSignal {
    const CHANNEL: &'static str = CONTROL_CHANNEL;
    const EVENT: &'static str = "start";
    const READS_BODY: bool = false;

    fn decode(_body: &[u8]) -> RelayResult<Self> {
        Ok(StartSignal)
    }
}

/// WebRTC session description offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOffer {
    pub sdp: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Signal for SessionOffer {
    const CHANNEL: &'static str = SIGNALING_CHANNEL;
    const EVENT: &'static str = "offer";

    fn decode(body: &[u8]) -> RelayResult<Self> {
        decode_json(body)
    }
}

/// Trickled ICE candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceCandidate {
    pub candidate: String,
    /// Required, but `null` is accepted and relayed as `null`
    #[serde(rename = "sdpMid", deserialize_with = "Option::deserialize")]
    pub sdp_mid: Option<String>,
    #[serde(rename = "sdpMLineIndex")]
    pub sdp_m_line_index: i64,
}

impl Signal for IceCandidate {
    const CHANNEL: &'static str = SIGNALING_CHANNEL;
    const EVENT: &'static str = "candidate";

    fn decode(body: &[u8]) -> RelayResult<Self> {
        decode_json(body)
    }
}
