// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{block, empty_listing_html, listing_html, orchestrator, test_settings, FakeBrowser};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use portal_sync::presentation::routes::routes;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn send(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn listing_server(delay: Duration) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("recruitPage", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_html(&[
                    block("프론트엔드 개발자", "대전스타트업", "상시채용"),
                    block("서버 개발자", "대전스타트업", "~ 03/31(화)"),
                ]))
                .set_delay(delay),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("recruitPage", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(empty_listing_html()))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_health_check() {
    let settings = test_settings("http://127.0.0.1:9", &[]);
    let app = routes(orchestrator(&settings, FakeBrowser::new(Vec::new())).orchestrator);

    let (status, body) = send(&app, "GET", "/health", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_listing_sync_returns_summary() {
    let server = listing_server(Duration::ZERO).await;
    let settings = test_settings(&server.uri(), &[]);
    let fixture = orchestrator(&settings, FakeBrowser::new(Vec::new()));
    let app = routes(fixture.orchestrator.clone());

    let (status, body) = send(&app, "POST", "/admin/sync/listings", r#"{"max_pages": 5}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "Listing sync finished: 2 items saved, 0 skipped by deadline, 0 already synced, 0 failed (pages visited: 2)"
    );
    assert_eq!(fixture.gateway.listings().len(), 2);
}

#[tokio::test]
async fn test_listing_sync_accepts_empty_body() {
    let server = listing_server(Duration::ZERO).await;
    let settings = test_settings(&server.uri(), &[]);
    let app = routes(orchestrator(&settings, FakeBrowser::new(Vec::new())).orchestrator);

    let (status, body) = send(&app, "POST", "/admin/sync/listings", "").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("2 items saved"));
}

#[tokio::test]
async fn test_invalid_listing_request_is_rejected() {
    let settings = test_settings("http://127.0.0.1:9", &[]);
    let app = routes(orchestrator(&settings, FakeBrowser::new(Vec::new())).orchestrator);

    let (status, body) = send(&app, "POST", "/admin/sync/listings", r#"{"target_count": 0}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("Validation failed"));

    let (status, _) = send(&app, "POST", "/admin/sync/listings", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_without_running_sync() {
    let settings = test_settings("http://127.0.0.1:9", &[]);
    let app = routes(orchestrator(&settings, FakeBrowser::new(Vec::new())).orchestrator);

    let (status, _) = send(&app, "POST", "/admin/sync/cancel", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// 运行期间的第二个请求被拒绝，运行可以被取消
#[tokio::test]
async fn test_concurrent_run_is_rejected_and_cancellable() {
    let server = listing_server(Duration::from_millis(500)).await;
    let settings = test_settings(&server.uri(), &[("pacing.page_interval_ms", "5000")]);
    let fixture = orchestrator(&settings, FakeBrowser::new(Vec::new()));
    let app = routes(fixture.orchestrator.clone());

    let first = tokio::spawn({
        let app = app.clone();
        async move { send(&app, "POST", "/admin/sync/listings", "").await }
    });
    while !fixture.orchestrator.is_running() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let (status, body) = send(&app, "POST", "/admin/sync/images", "").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("already in progress"));

    let (status, _) = send(&app, "POST", "/admin/sync/cancel", "").await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, body) = first.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Listing sync cancelled"), "{body}");
    assert!(!fixture.orchestrator.is_running());
}
