// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

pub const LISTINGS_SAVED: &str = "portal_sync_listings_saved_total";
pub const LISTINGS_SKIPPED: &str = "portal_sync_listings_skipped_total";
pub const PAGES_FETCHED: &str = "portal_sync_pages_fetched_total";
pub const IMAGE_JOBS: &str = "portal_sync_image_jobs_total";
pub const STORES_SAVED: &str = "portal_sync_stores_saved_total";

/// 安装 Prometheus 导出器
///
/// 地址无法解析时返回错误；端口被占用只记录警告。
pub fn init_metrics(listen_addr: &str) -> Result<(), std::net::AddrParseError> {
    let addr: SocketAddr = listen_addr.parse()?;

    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        tracing::warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return Ok(());
    }

    info!("Metrics exporter listening on {}", addr);
    Ok(())
}

pub fn record_listing_saved() {
    counter!(LISTINGS_SAVED).increment(1);
}

/// `reason`: `deadline`、`duplicate`、`failed`
pub fn record_listing_skipped(reason: &'static str) {
    counter!(LISTINGS_SKIPPED, "reason" => reason).increment(1);
}

pub fn record_page_fetched() {
    counter!(PAGES_FETCHED).increment(1);
}

pub fn record_image_job(outcome: &'static str) {
    counter!(IMAGE_JOBS, "outcome" => outcome).increment(1);
}

pub fn record_store_saved() {
    counter!(STORES_SAVED).increment(1);
}
