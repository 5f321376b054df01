// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod memory_gateway;

use portal_sync::application::use_cases::sync_orchestrator::{
    SyncComponents, SyncOptions, SyncOrchestrator,
};
use portal_sync::config::settings::{DatabaseSettings, Settings};
use portal_sync::engines::reqwest_engine::{ReqwestEngine, BROWSER_USER_AGENT};
use portal_sync::infrastructure::database::connection;
use portal_sync::infrastructure::storage::InMemoryStorage;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tempfile::TempDir;

pub use fake_browser::{FakeBrowser, FakePage};
pub use memory_gateway::InMemoryGateway;

/// 临时 sqlite 数据库，目录随结构体一起释放
pub struct TestDb {
    pub db: Arc<DatabaseConnection>,
    _dir: TempDir,
}

pub async fn sqlite_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("portal_sync.db").display()
    );
    let settings = DatabaseSettings {
        url,
        max_connections: Some(1),
        min_connections: Some(1),
        connect_timeout: Some(5),
        idle_timeout: None,
    };
    let db = connection::connect_and_migrate(&settings).await.unwrap();

    TestDb {
        db: Arc::new(db),
        _dir: dir,
    }
}

/// 指向测试服务器、无节流的配置
pub fn test_settings(base_url: &str, overrides: &[(&str, &str)]) -> Settings {
    let mut builder = Settings::defaults()
        .unwrap()
        .set_override(
            "listing.search_url",
            format!("{}/search?searchType=search", base_url),
        )
        .unwrap()
        .set_override("listing.link_base", base_url)
        .unwrap()
        .set_override("listing.fetch_timeout_secs", 5)
        .unwrap()
        .set_override("store_directory.api_url", format!("{}/api/stores/", base_url))
        .unwrap()
        .set_override("store_directory.pages", 3)
        .unwrap()
        .set_override("pacing.page_interval_ms", 0)
        .unwrap()
        .set_override("pacing.record_interval_ms", 0)
        .unwrap()
        .set_override("images.navigation_wait_ms", 0)
        .unwrap()
        .set_override("images.session_timeout_secs", 5)
        .unwrap();

    for (key, value) in overrides {
        builder = builder.set_override(*key, *value).unwrap();
    }
    builder.build().unwrap().try_deserialize().unwrap()
}

pub fn fetcher() -> Arc<ReqwestEngine> {
    Arc::new(ReqwestEngine::new(BROWSER_USER_AGENT).unwrap())
}

/// 使用内存协作者组装的编排器
pub struct TestOrchestrator {
    pub orchestrator: Arc<SyncOrchestrator>,
    pub gateway: Arc<InMemoryGateway>,
    pub browser: Arc<FakeBrowser>,
    pub storage: Arc<InMemoryStorage>,
}

pub fn orchestrator(settings: &Settings, browser: FakeBrowser) -> TestOrchestrator {
    let gateway = Arc::new(InMemoryGateway::default());
    let browser = Arc::new(browser);
    let storage = Arc::new(InMemoryStorage::new());

    let components = SyncComponents {
        gateway: gateway.clone(),
        fetcher: fetcher(),
        launcher: browser.clone(),
        storage: storage.clone(),
    };
    let orchestrator = Arc::new(SyncOrchestrator::new(
        components,
        SyncOptions::from_settings(settings).unwrap(),
    ));

    TestOrchestrator {
        orchestrator,
        gateway,
        browser,
        storage,
    }
}

/// 一个搜索结果块
pub struct Block<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub deadline: &'a str,
}

pub fn block<'a>(title: &'a str, company: &'a str, deadline: &'a str) -> Block<'a> {
    Block {
        title,
        company,
        deadline,
    }
}

/// 生成与真实搜索页结构一致的结果页
pub fn listing_html(blocks: &[Block<'_>]) -> String {
    let items: String = blocks
        .iter()
        .enumerate()
        .map(|(i, b)| {
            format!(
                r#"<div class="item_recruit">
                    <div class="area_job">
                        <h2 class="job_tit"><a href="/zf_user/jobs/relay/view?rec_idx={i}">{title}</a></h2>
                        <div class="job_date"><span class="date">{deadline}</span></div>
                        <div class="job_condition">
                            <span><a>대전</a> <a>유성구</a></span>
                            <span>신입</span>
                            <span>학력무관</span>
                        </div>
                    </div>
                    <div class="area_corp"><strong class="corp_name"><a href="/c/{i}">{company}</a></strong></div>
                </div>"#,
                i = i,
                title = b.title,
                deadline = b.deadline,
                company = b.company,
            )
        })
        .collect();

    format!(
        r#"<html><head><title>검색결과</title></head><body><div class="content">{}</div></body></html>"#,
        items
    )
}

pub fn empty_listing_html() -> String {
    listing_html(&[])
}
