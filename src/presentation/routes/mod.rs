// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::sync_orchestrator::SyncOrchestrator;
use crate::presentation::handlers::sync_handler;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(orchestrator: Arc<SyncOrchestrator>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let admin_routes = Router::new()
        .route("/admin/sync/listings", post(sync_handler::sync_listings))
        .route("/admin/sync/images", post(sync_handler::sync_images))
        .route("/admin/sync/stores", post(sync_handler::sync_stores))
        .route("/admin/sync/cancel", post(sync_handler::cancel_sync))
        .layer(Extension(orchestrator));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
