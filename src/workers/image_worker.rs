// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ImageSettings;
use crate::domain::models::image_job::{ImageJob, ImageOutcome};
use crate::domain::models::store::StoreRecord;
use crate::domain::repositories::persistence_gateway::PersistenceGateway;
use crate::domain::repositories::storage_repository::StorageRepository;
use crate::engines::traits::{BrowserLauncher, PageFetcher};
use crate::infrastructure::{metrics, storage::image_key};
use crate::utils::errors::SyncError;
use crate::workers::session_slot::SessionSlot;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// 候选图片选择器，按顺序尝试，第一个非空结果生效
pub const CANDIDATE_SELECTORS: [&str; 2] = ["div[role='main'] a img", "div[role='main'] img"];

/// 图片采集参数
#[derive(Debug, Clone)]
pub struct ImageWorkerOptions {
    pub navigation_wait: Duration,
    pub frame_name: String,
    pub frame_timeout: Duration,
    pub probe_timeout: Duration,
    pub download_timeout: Duration,
    /// 单条记录的整体期限
    pub session_timeout: Duration,
    pub recycle_after: u32,
}

impl From<&ImageSettings> for ImageWorkerOptions {
    fn from(settings: &ImageSettings) -> Self {
        Self {
            navigation_wait: Duration::from_millis(settings.navigation_wait_ms),
            frame_name: settings.frame_name.clone(),
            frame_timeout: Duration::from_secs(settings.frame_timeout_secs),
            probe_timeout: Duration::from_secs(settings.probe_timeout_secs),
            download_timeout: Duration::from_secs(settings.download_timeout_secs),
            session_timeout: Duration::from_secs(settings.session_timeout_secs),
            recycle_after: settings.recycle_after,
        }
    }
}

/// 过滤掉内联数据和矢量图标
pub fn is_acceptable_image(src: &str) -> bool {
    let lower = src.trim().to_ascii_lowercase();
    lower.starts_with("http") && !lower.contains("data:image") && !lower.contains(".svg")
}

/// 图片采集工作者
///
/// 每个工作者拥有一个会话槽，逐条处理记录，任何单条记录的失败都不会向外传播。
pub struct ImageAcquisitionWorker {
    worker_id: usize,
    slot: SessionSlot,
    fetcher: Arc<dyn PageFetcher>,
    storage: Arc<dyn StorageRepository>,
    gateway: Arc<dyn PersistenceGateway>,
    options: ImageWorkerOptions,
}

impl ImageAcquisitionWorker {
    pub fn new(
        worker_id: usize,
        launcher: Arc<dyn BrowserLauncher>,
        fetcher: Arc<dyn PageFetcher>,
        storage: Arc<dyn StorageRepository>,
        gateway: Arc<dyn PersistenceGateway>,
        options: ImageWorkerOptions,
    ) -> Self {
        Self {
            worker_id,
            slot: SessionSlot::new(launcher, options.recycle_after),
            fetcher,
            storage,
            gateway,
            options,
        }
    }

    /// 处理一条记录
    pub async fn process(&mut self, record: &StoreRecord) -> ImageJob {
        let Some(profile_url) = record.profile_url() else {
            let mut job = ImageJob::new(record.id, "");
            job.outcome = ImageOutcome::NoImageFound;
            return job;
        };

        let mut job = ImageJob::new(record.id, profile_url);
        let deadline = self.options.session_timeout;
        let result = tokio::time::timeout(deadline, self.acquire_image(&mut job))
            .await
            .unwrap_or_else(|_| {
                Err(SyncError::NetworkTimeout(format!(
                    "record exceeded session deadline of {:?}",
                    deadline
                )))
            });

        match result {
            Ok(()) => {
                job.outcome = ImageOutcome::Saved;
                self.slot.release().await;
                info!(
                    worker = self.worker_id,
                    record_id = record.id,
                    outcome = %job.outcome,
                    file = job.local_filename.as_deref().unwrap_or_default(),
                    "Image saved"
                );
            }
            Err(SyncError::NoImageFound) => {
                job.outcome = ImageOutcome::NoImageFound;
                self.slot.release().await;
                info!(
                    worker = self.worker_id,
                    record_id = record.id,
                    outcome = %job.outcome,
                    "No candidate image"
                );
            }
            Err(err) => {
                job.outcome = ImageOutcome::SessionError;
                self.slot.discard().await;
                warn!(
                    worker = self.worker_id,
                    record_id = record.id,
                    outcome = %job.outcome,
                    "Image acquisition failed: {}",
                    err
                );
            }
        }

        metrics::record_image_job(job.outcome.as_str());
        job
    }

    /// 关闭工作者持有的会话
    pub async fn shutdown(&mut self) {
        self.slot.shutdown().await;
    }

    async fn acquire_image(&mut self, job: &mut ImageJob) -> Result<(), SyncError> {
        let session = self.slot.acquire().await?;

        session.navigate(&job.profile_url).await?;
        tokio::time::sleep(self.options.navigation_wait).await;

        let in_frame = session
            .enter_frame(&self.options.frame_name, self.options.frame_timeout)
            .await?;
        debug!(record_id = job.record_id, in_frame, "Content context ready");

        let mut candidate = None;
        for selector in CANDIDATE_SELECTORS {
            let sources =
                match tokio::time::timeout(self.options.probe_timeout, session.image_sources(selector))
                    .await
                {
                    Ok(sources) => sources?,
                    Err(_) => {
                        debug!(record_id = job.record_id, selector, "Image probe timed out");
                        continue;
                    }
                };

            if let Some(src) = sources.into_iter().find(|src| is_acceptable_image(src)) {
                candidate = Some(src);
                break;
            }
        }

        let src = candidate.ok_or(SyncError::NoImageFound)?;
        job.candidate_image_url = Some(src.clone());

        let bytes = self
            .fetcher
            .fetch_bytes(&src, self.options.download_timeout)
            .await?;

        let filename = image_key(job.record_id);
        self.storage
            .save(&filename, &bytes)
            .await
            .map_err(|e| SyncError::Storage(e.to_string()))?;
        if let Err(err) = self
            .gateway
            .update_image_path(job.record_id, &filename)
            .await
        {
            // No row points at the file, remove it
            if let Err(e) = self.storage.delete(&filename).await {
                warn!(record_id = job.record_id, "Failed to remove orphaned image {}: {}", filename, e);
            }
            return Err(err.into());
        }

        job.local_filename = Some(filename);
        Ok(())
    }
}
