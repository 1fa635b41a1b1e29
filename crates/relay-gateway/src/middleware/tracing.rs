//! Request tracing middleware.
//!
//! Wraps each request in a `relay_request` span and logs its outcome once the
//! response is produced. Bodies are never recorded.

use axum::{body::Body, http::Request, response::Response};
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};
use tracing::{info, info_span, warn, Instrument, Span};

/// Tracing layer that creates spans for each request
#[derive(Clone, Default)]
pub struct TracingLayer;

impl TracingLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for TracingLayer {
    type Service = TracingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TracingService { inner }
    }
}

/// Tracing service
#[derive(Clone)]
pub struct TracingService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for TracingService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let mut inner = self.inner.clone();

        let span = info_span!(
            "relay_request",
            http.method = %req.method(),
            http.target = %req.uri().path(),
            http.status_code = tracing::field::Empty,
        );
        let started = Instant::now();

        Box::pin(
            async move {
                let result = inner.call(req).await;

                if let Ok(response) = &result {
                    let status = response.status();
                    let elapsed_ms = started.elapsed().as_millis() as u64;
                    Span::current().record("http.status_code", status.as_u16());
                    if status.is_server_error() {
                        warn!(elapsed_ms, "Request failed");
                    } else {
                        info!(elapsed_ms, "Request completed");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}
