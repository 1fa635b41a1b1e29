//! # Relay Endpoint Flows
//!
//! Drives the full router (middleware included) with an in-memory recording
//! publisher and checks the contract of each endpoint:
//!
//! 1. **Method gate**: non-POST → 405, nothing published
//! 2. **Decode gate**: malformed JSON → 400, nothing published
//! 3. **Relay**: well-formed → exactly one publish on the fixed (channel, event)
//! 4. **Envelope**: `{"status":"ok"}` / `{"status":"error","error":M}`

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use relay_gateway::{
        RecordingPublisher, RelayConfig, RelayService, CANDIDATE_PATH, OFFER_PATH, START_PATH,
    };
    use serde_json::json;
    use tower::ServiceExt;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const OFFER_BODY: &str = r#"{"sdp":"v=0...","type":"offer"}"#;
    const CANDIDATE_BODY: &str =
        r#"{"candidate":"candidate:1 1 UDP...","sdpMid":"0","sdpMLineIndex":0}"#;

    fn app(publisher: &Arc<RecordingPublisher>) -> Router {
        RelayService::new(RelayConfig::default(), publisher.clone())
            .expect("default config is valid")
            .router()
    }

    async fn send(app: Router, method: Method, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[tokio::test]
    async fn start_signal_publishes_null_on_control() {
        let publisher = Arc::new(RecordingPublisher::new());
        let (status, body) = send(app(&publisher), Method::POST, START_PATH, "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);

        let events = publisher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].channel, "control");
        assert_eq!(events[0].event, "start");
        assert!(events[0].payload.is_null());
    }

    #[tokio::test]
    async fn offer_is_relayed_verbatim() {
        let publisher = Arc::new(RecordingPublisher::new());
        let (status, body) = send(app(&publisher), Method::POST, OFFER_PATH, OFFER_BODY).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);

        let events = publisher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].channel, "webrtc-signaling");
        assert_eq!(events[0].event, "offer");
        assert_eq!(events[0].payload, json!({"sdp": "v=0...", "type": "offer"}));
    }

    #[tokio::test]
    async fn candidate_is_relayed_verbatim() {
        let publisher = Arc::new(RecordingPublisher::new());
        let (status, body) =
            send(app(&publisher), Method::POST, CANDIDATE_PATH, CANDIDATE_BODY).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);

        let events = publisher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].channel, "webrtc-signaling");
        assert_eq!(events[0].event, "candidate");
        assert_eq!(
            events[0].payload,
            json!({
                "candidate": "candidate:1 1 UDP...",
                "sdpMid": "0",
                "sdpMLineIndex": 0
            })
        );
    }

    #[tokio::test]
    async fn start_signal_ignores_oversized_body() {
        let publisher = Arc::new(RecordingPublisher::new());
        let oversized = "x".repeat(70_000);
        let (status, body) = send(app(&publisher), Method::POST, START_PATH, &oversized).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);
        assert_eq!(publisher.call_count(), 1);
    }

    #[tokio::test]
    async fn candidate_index_and_null_mid_are_relayed_verbatim() {
        let publisher = Arc::new(RecordingPublisher::new());
        let raw = r#"{"candidate":"candidate:1 1 UDP","sdpMid":null,"sdpMLineIndex":-1}"#;
        let (status, _) = send(app(&publisher), Method::POST, CANDIDATE_PATH, raw).await;
        assert_eq!(status, StatusCode::OK);

        let raw = r#"{"candidate":"candidate:2 1 UDP","sdpMid":"0","sdpMLineIndex":5000000000}"#;
        let (status, _) = send(app(&publisher), Method::POST, CANDIDATE_PATH, raw).await;
        assert_eq!(status, StatusCode::OK);

        let events = publisher.events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].payload,
            json!({"candidate": "candidate:1 1 UDP", "sdpMid": null, "sdpMLineIndex": -1})
        );
        assert_eq!(events[1].payload["sdpMLineIndex"], json!(5_000_000_000i64));
    }

    #[tokio::test]
    async fn non_post_is_rejected_on_every_endpoint() {
        let publisher = Arc::new(RecordingPublisher::new());

        for path in [START_PATH, OFFER_PATH, CANDIDATE_PATH] {
            for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
                let (status, body) = send(app(&publisher), method.clone(), path, OFFER_BODY).await;
                assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{} {}", method, path);
                assert_eq!(body, r#"{"status":"error","error":"method not allowed"}"#);
            }
        }

        assert_eq!(publisher.call_count(), 0);
    }

    #[tokio::test]
    async fn malformed_bodies_are_rejected_before_publish() {
        let publisher = Arc::new(RecordingPublisher::new());
        let malformed = [
            "",
            "not json",
            "{\"sdp\":",
            "[]",
            "null",
            r#"{"sdp":"v=0"}"#,
            r#"{"candidate":"c","sdpMid":"0","sdpMLineIndex":"zero"}"#,
        ];

        for path in [OFFER_PATH, CANDIDATE_PATH] {
            for raw in malformed {
                let (status, body) = send(app(&publisher), Method::POST, path, raw).await;
                assert_eq!(status, StatusCode::BAD_REQUEST, "{} {:?}", path, raw);
                let envelope: serde_json::Value = serde_json::from_str(&body).unwrap();
                assert_eq!(envelope["status"], "error");
            }
        }

        assert_eq!(publisher.call_count(), 0);
    }

    #[tokio::test]
    async fn publish_failure_returns_500_with_message() {
        let publisher = Arc::new(RecordingPublisher::failing("M"));

        for (path, raw) in [(START_PATH, ""), (OFFER_PATH, OFFER_BODY), (CANDIDATE_PATH, CANDIDATE_BODY)] {
            let (status, body) = send(app(&publisher), Method::POST, path, raw).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, r#"{"status":"error","error":"M"}"#);
        }

        // One attempt per request, no retries
        assert_eq!(publisher.call_count(), 3);
    }

    #[tokio::test]
    async fn concurrent_requests_are_independent() {
        let publisher = Arc::new(RecordingPublisher::new());
        let router = app(&publisher);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let router = router.clone();
                let body = format!(
                    r#"{{"candidate":"candidate:{} 1 UDP","sdpMid":"0","sdpMLineIndex":{}}}"#,
                    i, i
                );
                tokio::spawn(async move { send(router, Method::POST, CANDIDATE_PATH, &body).await })
            })
            .collect();

        for handle in handles {
            let (status, _) = handle.await.unwrap();
            assert_eq!(status, StatusCode::OK);
        }

        let mut indexes: Vec<u64> = publisher
            .events()
            .iter()
            .map(|e| e.payload["sdpMLineIndex"].as_u64().unwrap())
            .collect();
        indexes.sort_unstable();
        assert_eq!(indexes, (0..16).collect::<Vec<_>>());
    }
}
