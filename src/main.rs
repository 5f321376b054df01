// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use portal_sync::application::use_cases::sync_orchestrator::{
    SyncComponents, SyncOptions, SyncOrchestrator,
};
use portal_sync::config::settings::Settings;
use portal_sync::engines::chromium_engine::{ChromiumLauncher, ChromiumOptions};
use portal_sync::engines::reqwest_engine::ReqwestEngine;
use portal_sync::infrastructure::database::connection;
use portal_sync::infrastructure::metrics;
use portal_sync::infrastructure::repositories::SeaOrmGateway;
use portal_sync::infrastructure::storage::LocalStorage;
use portal_sync::presentation::routes;
use portal_sync::utils::telemetry;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动管理端服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting portal-sync...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    if settings.metrics.enabled {
        metrics::init_metrics(&settings.metrics.listen_addr)?;
    }

    // 3. Connect to database and apply migrations
    let db = Arc::new(connection::connect_and_migrate(&settings.database).await?);
    info!("Database connection established");

    // 4. Initialize components
    let fetcher = Arc::new(ReqwestEngine::new(&settings.listing.user_agent)?);
    let launcher = Arc::new(ChromiumLauncher::new(ChromiumOptions {
        headless: settings.images.headless,
        remote_debugging_url: settings.images.remote_debugging_url.clone(),
        user_agent: settings.listing.user_agent.clone(),
        request_timeout: Duration::from_secs(settings.images.session_timeout_secs),
    }));
    let components = SyncComponents {
        gateway: Arc::new(SeaOrmGateway::new(db.clone())),
        fetcher,
        launcher,
        storage: Arc::new(LocalStorage::new(&settings.images.storage_dir)),
    };
    let orchestrator = Arc::new(SyncOrchestrator::new(
        components,
        SyncOptions::from_settings(&settings)?,
    ));

    // 5. Start HTTP server
    let app = routes::routes(orchestrator.clone());
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received");
                orchestrator.cancel();
            }
        })
        .await?;

    Ok(())
}
