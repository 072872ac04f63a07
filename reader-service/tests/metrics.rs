mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestApp;
use reader_service::services::metrics::init_metrics;
use serde_json::json;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// The recorder is process-global, so everything lives in one test.
#[tokio::test]
async fn metrics_endpoint_exposes_request_and_domain_counters() {
    init_metrics().unwrap();
    let app = TestApp::spawn().await;

    let (status, _, _) = app.send(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.post_json("/define", json!({"word": "dog"})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, headers, body) = app.send(get("/metrics")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("http_requests_total"));
    assert!(text.contains("path=\"/health\""));
    assert!(text.contains("reader_definitions_total"));
}
