//! Uniform JSON reply shared by every relay endpoint.

use crate::domain::error::RelayError;
use axum::{
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Outcome reported in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// `{"status":"ok"}` or `{"status":"error","error":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    pub fn ok() -> Self {
        Self {
            status: Status::Ok,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            error: Some(message.into()),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(ResponseEnvelope::error(self.to_string()))).into_response();
        if matches!(self, RelayError::MethodNotAllowed) {
            response.headers_mut().insert(
                header::ALLOW,
                HeaderValue::from_static(Method::POST.as_str()),
            );
        }
        response
    }
}
