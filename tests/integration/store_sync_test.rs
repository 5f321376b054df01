// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{fetcher, orchestrator, sqlite_db, test_settings, FakeBrowser, InMemoryGateway};
use portal_sync::application::use_cases::store_sync::StoreDirectorySync;
use portal_sync::domain::repositories::persistence_gateway::PersistenceGateway;
use portal_sync::infrastructure::repositories::SeaOrmGateway;
use portal_sync::infrastructure::store_directory::StoreDirectoryClient;
use portal_sync::utils::pacing::Pacer;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, page: u32, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/stores/"))
        .and(query_param("page", page.to_string()))
        .respond_with(response)
        .mount(server)
        .await;
}

fn store_page(entries: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "count": 100,
        "next": null,
        "results": entries,
    }))
}

fn client(server: &MockServer) -> StoreDirectoryClient {
    StoreDirectoryClient::new(
        fetcher(),
        Url::parse(&format!("{}/api/stores/", server.uri())).unwrap(),
        Duration::from_secs(5),
    )
}

/// 单页失败不影响后续页面
#[tokio::test]
async fn test_failed_page_does_not_stop_directory_sync() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        store_page(json!([
            { "REST_ID": 1, "REST_NM": "한밭칼국수", "SD_URL": "https://map.example.com/place/1" },
            { "REST_NM": "이름만 있는 가게" },
        ])),
    )
    .await;
    mount_page(&server, 2, ResponseTemplate::new(500)).await;
    mount_page(
        &server,
        3,
        store_page(json!([{ "REST_ID": "3", "REST_NM": "성심당", "MENU_KORN_NM": ["튀김소보로"] }])),
    )
    .await;

    let gateway = Arc::new(InMemoryGateway::default());
    let sync = StoreDirectorySync::new(client(&server), gateway.clone(), Pacer::immediate());
    let report = sync.run(3, &CancellationToken::new()).await;

    assert_eq!(report.pages_requested, 3);
    assert_eq!(report.pages_failed, 1);
    assert_eq!(report.saved_count, 2);
    assert_eq!(report.failed_count, 1);
    assert_eq!(
        report.summary(),
        "Store sync finished: 2 items saved, 1 failed (pages: 3, failed pages: 1)"
    );
    assert_eq!(gateway.store(3).unwrap().menu, vec!["튀김소보로"]);
}

#[tokio::test]
async fn test_empty_and_malformed_pages_are_skipped() {
    let server = MockServer::start().await;
    mount_page(&server, 1, store_page(json!([]))).await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
    )
    .await;

    let gateway = Arc::new(InMemoryGateway::default());
    let report = StoreDirectorySync::new(client(&server), gateway, Pacer::immediate())
        .run(2, &CancellationToken::new())
        .await;

    assert_eq!(report.saved_count, 0);
    assert_eq!(report.pages_failed, 1);
}

/// 重新同步不会覆盖已采集的图片文件名
#[tokio::test]
async fn test_resync_keeps_image_path() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        store_page(json!([{ "REST_ID": 42, "REST_NM": "Old name", "SD_URL": "https://map.example.com/place/42" }])),
    )
    .await;

    let test_db = sqlite_db().await;
    let gateway = Arc::new(SeaOrmGateway::new(test_db.db.clone()));
    StoreDirectorySync::new(client(&server), gateway.clone(), Pacer::immediate())
        .run(1, &CancellationToken::new())
        .await;
    gateway.update_image_path(42, "42.jpg").await.unwrap();

    let updated = MockServer::start().await;
    mount_page(
        &updated,
        1,
        store_page(json!([{ "REST_ID": 42, "REST_NM": "New name", "SD_URL": "https://map.example.com/place/42" }])),
    )
    .await;
    let report = StoreDirectorySync::new(client(&updated), gateway.clone(), Pacer::immediate())
        .run(1, &CancellationToken::new())
        .await;
    assert_eq!(report.saved_count, 1);

    let records = gateway.list_records_with_profile_url().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "New name");
    assert_eq!(records[0].image_path.as_deref(), Some("42.jpg"));
}

#[tokio::test]
async fn test_orchestrated_store_sync_summary() {
    let server = MockServer::start().await;
    for page in 1..=3 {
        mount_page(
            &server,
            page,
            store_page(json!([{ "REST_ID": page, "REST_NM": format!("store {}", page) }])),
        )
        .await;
    }

    let settings = test_settings(&server.uri(), &[]);
    let fixture = orchestrator(&settings, FakeBrowser::new(Vec::new()));
    let summary = fixture.orchestrator.run_store_sync().await.unwrap();

    assert_eq!(
        summary,
        "Store sync finished: 3 items saved, 0 failed (pages: 3, failed pages: 0)"
    );
    assert!(fixture.gateway.store(2).is_some());
    assert!(!fixture.orchestrator.is_running());
}
