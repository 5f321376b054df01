// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::persistence_gateway::PersistenceGateway;
use crate::infrastructure::{
    metrics,
    store_directory::{StoreDirectoryClient, StoreDirectoryEntry},
};
use crate::utils::{errors::SyncError, pacing::Pacer};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// 店铺目录同步结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSyncReport {
    pub pages_requested: u32,
    pub pages_failed: u32,
    pub saved_count: usize,
    pub failed_count: usize,
    pub cancelled: bool,
}

impl StoreSyncReport {
    pub fn summary(&self) -> String {
        let verb = if self.cancelled { "cancelled" } else { "finished" };
        format!(
            "Store sync {}: {} items saved, {} failed (pages: {}, failed pages: {})",
            verb, self.saved_count, self.failed_count, self.pages_requested, self.pages_failed
        )
    }
}

/// 店铺目录同步
///
/// 与公告爬虫不同，单页失败或空页只记录日志，继续请求下一页。
pub struct StoreDirectorySync {
    client: StoreDirectoryClient,
    gateway: Arc<dyn PersistenceGateway>,
    pacer: Pacer,
}

impl StoreDirectorySync {
    pub fn new(
        client: StoreDirectoryClient,
        gateway: Arc<dyn PersistenceGateway>,
        pacer: Pacer,
    ) -> Self {
        Self {
            client,
            gateway,
            pacer,
        }
    }

    /// 同步第 1 到 `pages` 页
    pub async fn run(&self, pages: u32, cancel: &CancellationToken) -> StoreSyncReport {
        let mut report = StoreSyncReport::default();
        info!(pages, "Store directory sync started");

        for page in 1..=pages {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }
            report.pages_requested += 1;

            match self.client.fetch_page(page).await {
                Ok(body) if body.results.is_empty() => {
                    warn!(page, "Store directory page is empty");
                }
                Ok(body) => {
                    for entry in body.results {
                        match self.save_entry(entry).await {
                            Ok(()) => {
                                report.saved_count += 1;
                                metrics::record_store_saved();
                            }
                            Err(err) => {
                                report.failed_count += 1;
                                warn!(page, "Failed to save store entry: {}", err);
                            }
                        }
                    }
                    info!(page, saved = report.saved_count, "Store directory page processed");
                }
                Err(err) => {
                    report.pages_failed += 1;
                    error!(page, "Store directory page failed: {}", err);
                }
            }

            if page < pages && !self.pacer.pause(cancel).await {
                report.cancelled = true;
                break;
            }
        }

        info!("{}", report.summary());
        report
    }

    async fn save_entry(&self, entry: StoreDirectoryEntry) -> Result<(), SyncError> {
        let record = entry.into_record()?;
        self.gateway.save_store(&record).await?;
        Ok(())
    }
}
