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

use crate::{
    application::use_cases::{
        listing_crawler::ListingCrawler,
        store_sync::{StoreDirectorySync, StoreSyncReport},
    },
    config::settings::Settings,
    domain::{
        models::{
            crawl_run::CrawlRun,
            image_job::{ImageBatch, ImageJob},
            store::StoreRecord,
        },
        repositories::{
            persistence_gateway::PersistenceGateway, storage_repository::StorageRepository,
        },
        services::eligibility_filter::EligibilityFilter,
    },
    engines::traits::{BrowserLauncher, PageFetcher},
    infrastructure::{search::ListingPage, store_directory::StoreDirectoryClient},
    utils::{
        errors::SyncError,
        pacing::{PaceGate, Pacer},
    },
    workers::image_worker::{ImageAcquisitionWorker, ImageWorkerOptions},
};
use futures::future::join_all;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;
use url::Url;

#[derive(Error, Debug)]
pub enum SyncRunError {
    #[error("Another sync run is already in progress")]
    Busy,
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Sync failed: {0}")]
    Sync(#[from] SyncError),
    #[error("Sync task terminated: {0}")]
    Task(String),
}

/// 编排器依赖的外部协作者
#[derive(Clone)]
pub struct SyncComponents {
    pub gateway: Arc<dyn PersistenceGateway>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub launcher: Arc<dyn BrowserLauncher>,
    pub storage: Arc<dyn StorageRepository>,
}

/// 编排器的运行参数
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub listing_page: ListingPage,
    pub filter: EligibilityFilter,
    pub category: String,
    pub default_keyword: String,
    pub default_target_count: u32,
    pub default_max_pages: u32,
    pub fetch_timeout: Duration,
    pub image: ImageWorkerOptions,
    pub image_workers: usize,
    pub store_api_url: Url,
    pub store_pages: u32,
    pub page_pacer: Pacer,
    pub record_pacer: Pacer,
}

impl SyncOptions {
    pub fn from_settings(settings: &Settings) -> Result<Self, SyncRunError> {
        let listing_page =
            ListingPage::new(&settings.listing.search_url, &settings.listing.link_base)
                .map_err(|e| SyncRunError::Config(format!("listing url: {}", e)))?;
        let store_api_url = Url::parse(&settings.store_directory.api_url)
            .map_err(|e| SyncRunError::Config(format!("store directory url: {}", e)))?;

        Ok(Self {
            listing_page,
            filter: settings.eligibility.filter(),
            category: settings.listing.category.clone(),
            default_keyword: settings.listing.keyword.clone(),
            default_target_count: settings.listing.target_count,
            default_max_pages: settings.listing.max_pages,
            fetch_timeout: settings.listing.fetch_timeout(),
            image: ImageWorkerOptions::from(&settings.images),
            image_workers: settings.images.workers.max(1),
            store_api_url,
            store_pages: settings.store_directory.pages,
            page_pacer: Pacer::new(Duration::from_millis(settings.pacing.page_interval_ms)),
            record_pacer: Pacer::new(Duration::from_millis(settings.pacing.record_interval_ms)),
        })
    }
}

/// 列表同步的可选覆盖参数
#[derive(Debug, Clone, Default)]
pub struct ListingRunParams {
    pub keyword: Option<String>,
    pub target_count: Option<u32>,
    pub max_pages: Option<u32>,
}

/// 同步编排器
///
/// 驱动三类同步任务，负责节奏控制、运行计数和摘要文本。
/// 同一时刻只允许一个运行，进行中的运行可以被取消。
/// 每个运行在编排器自己的任务上执行，调用方断开不会中断运行。
pub struct SyncOrchestrator {
    components: SyncComponents,
    options: SyncOptions,
    run_lock: Arc<tokio::sync::Mutex<()>>,
    active: Arc<parking_lot::Mutex<Option<CancellationToken>>>,
}

/// 运行期间持有互斥锁，结束时清除取消令牌
struct RunGuard {
    _lock: tokio::sync::OwnedMutexGuard<()>,
    active: Arc<parking_lot::Mutex<Option<CancellationToken>>>,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.active.lock().take();
    }
}

impl SyncOrchestrator {
    pub fn new(components: SyncComponents, options: SyncOptions) -> Self {
        Self {
            components,
            options,
            run_lock: Arc::new(tokio::sync::Mutex::new(())),
            active: Arc::new(parking_lot::Mutex::new(None)),
        }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// 是否有运行正在进行
    pub fn is_running(&self) -> bool {
        self.active.lock().is_some()
    }

    /// 取消进行中的运行
    ///
    /// 运行会在下一个页面或记录边界停止；没有运行时返回 `false`
    pub fn cancel(&self) -> bool {
        match self.active.lock().as_ref() {
            Some(token) => {
                info!("Cancellation requested for running sync");
                token.cancel();
                true
            }
            None => false,
        }
    }

    fn begin(&self) -> Result<(RunGuard, CancellationToken), SyncRunError> {
        let lock = self
            .run_lock
            .clone()
            .try_lock_owned()
            .map_err(|_| SyncRunError::Busy)?;
        let token = CancellationToken::new();
        *self.active.lock() = Some(token.clone());
        Ok((
            RunGuard {
                _lock: lock,
                active: self.active.clone(),
            },
            token,
        ))
    }

    /// 在独立任务上执行运行，返回其摘要
    ///
    /// 等待结果的调用方被丢弃时，任务照常运行到结束并释放运行锁。
    async fn spawn_run<F, Fut>(self: &Arc<Self>, run: F) -> Result<String, SyncRunError>
    where
        F: FnOnce(Arc<Self>, CancellationToken) -> Fut,
        Fut: Future<Output = Result<String, SyncRunError>> + Send + 'static,
    {
        let (guard, cancel) = self.begin()?;
        let task = run(Arc::clone(self), cancel);
        let handle = tokio::spawn(async move {
            let _guard = guard;
            task.await
        });

        handle
            .await
            .map_err(|e| SyncRunError::Task(e.to_string()))?
    }

    /// 运行招聘列表同步并返回摘要
    pub async fn run_listing_sync(
        self: &Arc<Self>,
        params: ListingRunParams,
    ) -> Result<String, SyncRunError> {
        self.spawn_run(|this, cancel| async move {
            let run = this.crawl_listings(params, &cancel).await;
            Ok(run.summary())
        })
        .await
    }

    /// 运行图片采集批次并返回摘要
    pub async fn run_image_sync(self: &Arc<Self>) -> Result<String, SyncRunError> {
        self.spawn_run(|this, cancel| async move {
            let batch = this.sync_images(&cancel).await?;
            Ok(batch.summary())
        })
        .await
    }

    /// 运行店铺目录同步并返回摘要
    pub async fn run_store_sync(self: &Arc<Self>) -> Result<String, SyncRunError> {
        self.spawn_run(|this, cancel| async move {
            let report = this.sync_stores(&cancel).await;
            Ok(report.summary())
        })
        .await
    }

    /// 执行一次列表爬取，未指定的参数使用配置默认值
    pub async fn crawl_listings(
        &self,
        params: ListingRunParams,
        cancel: &CancellationToken,
    ) -> CrawlRun {
        let keyword = params
            .keyword
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| self.options.default_keyword.clone());
        let target_count = params
            .target_count
            .unwrap_or(self.options.default_target_count);
        let max_pages = params.max_pages.unwrap_or(self.options.default_max_pages);

        let crawler = ListingCrawler::new(
            self.components.fetcher.clone(),
            self.components.gateway.clone(),
            self.options.listing_page.clone(),
            self.options.filter,
            self.options.category.clone(),
            self.options.fetch_timeout,
            self.options.page_pacer,
        );

        crawler
            .run(&keyword, target_count as usize, max_pages, cancel)
            .await
    }

    /// 对所有带介绍页地址的记录执行图片采集
    pub async fn sync_images(&self, cancel: &CancellationToken) -> Result<ImageBatch, SyncError> {
        let records = self.components.gateway.list_records_with_profile_url().await?;
        let total = records.len();
        let (ready, missing): (Vec<StoreRecord>, Vec<StoreRecord>) = records
            .into_iter()
            .partition(|record| record.profile_url().is_some());

        let worker_count = self.options.image_workers.max(1).min(ready.len().max(1));
        info!(
            records = total,
            skipped = missing.len(),
            workers = worker_count,
            "Image sync started"
        );

        let queue = tokio::sync::Mutex::new(VecDeque::from(ready));
        let gate = PaceGate::new(self.options.record_pacer.interval());

        let runs = (0..worker_count).map(|worker_id| {
            let mut worker = ImageAcquisitionWorker::new(
                worker_id,
                self.components.launcher.clone(),
                self.components.fetcher.clone(),
                self.components.storage.clone(),
                self.components.gateway.clone(),
                self.options.image.clone(),
            );
            let queue = &queue;
            let gate = &gate;

            async move {
                let mut jobs: Vec<ImageJob> = Vec::new();
                let mut cancelled = false;

                loop {
                    if cancel.is_cancelled() {
                        cancelled = true;
                        break;
                    }
                    let next = queue.lock().await.pop_front();
                    let Some(record) = next else {
                        break;
                    };
                    if !gate.wait_turn(cancel).await {
                        cancelled = true;
                        break;
                    }

                    jobs.push(worker.process(&record).await);
                }

                worker.shutdown().await;
                (jobs, cancelled)
            }
        });

        let mut batch = ImageBatch {
            skipped_count: missing.len(),
            ..Default::default()
        };
        for (jobs, cancelled) in join_all(runs).await {
            batch.jobs.extend(jobs);
            batch.cancelled |= cancelled;
        }
        batch.jobs.sort_by_key(|job| job.record_id);

        info!("{}", batch.summary());
        Ok(batch)
    }

    /// 同步店铺目录
    pub async fn sync_stores(&self, cancel: &CancellationToken) -> StoreSyncReport {
        let client = StoreDirectoryClient::new(
            self.components.fetcher.clone(),
            self.options.store_api_url.clone(),
            self.options.fetch_timeout,
        );
        let sync = StoreDirectorySync::new(
            client,
            self.components.gateway.clone(),
            self.options.page_pacer,
        );
        sync.run(self.options.store_pages, cancel).await
    }
}
