//! Relay error types and their HTTP mapping.
//!
//! Every error is terminal for the request that produced it: no retry, no
//! partial success. The HTTP layer converts each one into a status code plus
//! the uniform [`ResponseEnvelope`](crate::domain::envelope::ResponseEnvelope).

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;

/// Failure of a single publish call to the broadcast service.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Credentials are missing or unusable
    #[error("broadcast credentials not configured: {0}")]
    Credentials(String),

    /// Channel name rejected before sending
    #[error("invalid channel name: {0}")]
    InvalidChannel(String),

    /// Event name rejected before sending
    #[error("invalid event name: {0}")]
    InvalidEvent(String),

    /// Encoded event data exceeds the service limit
    #[error("event data is {size} bytes, limit is {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },

    /// Payload could not be encoded
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),

    /// Network or TLS failure talking to the service, message kept verbatim
    #[error("{0}")]
    Transport(String),

    /// Service answered with a non-success status
    #[error("Status Code: {status} - {body}")]
    Rejected { status: u16, body: String },
}

impl From<reqwest::Error> for PublishError {
    fn from(e: reqwest::Error) -> Self {
        PublishError::Transport(e.to_string())
    }
}

/// Per-request relay failure.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Wrong HTTP verb
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Body is not valid JSON for the expected shape
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Body could not be read (too large, aborted upload)
    #[error("{message}")]
    UnreadableBody { status: StatusCode, message: String },

    /// The broadcast service refused or could not be reached
    #[error(transparent)]
    Relay(#[from] PublishError),
}

impl RelayError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            RelayError::UnreadableBody { status, .. } => *status,
            RelayError::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(e: serde_json::Error) -> Self {
        RelayError::MalformedPayload(e.to_string())
    }
}

impl From<BytesRejection> for RelayError {
    fn from(rejection: BytesRejection) -> Self {
        RelayError::UnreadableBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Result type for relay operations
pub type RelayResult<T> = Result<T, RelayError>;

/// Service-level errors (startup, binding), not per request.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(String),
}
