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
    domain::{
        models::{
            crawl_run::{CrawlRun, StopReason},
            listing::ListingBlock,
        },
        repositories::persistence_gateway::PersistenceGateway,
        services::eligibility_filter::EligibilityFilter,
    },
    engines::traits::PageFetcher,
    infrastructure::{metrics, search::ListingPage},
    utils::{
        errors::{RepositoryError, SyncError},
        pacing::Pacer,
    },
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// 单个结果块的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    /// 已写入新记录
    Saved,
    /// 截止日期不符，未尝试写入
    Ineligible,
    /// 去重键已存在
    Duplicate,
}

/// 招聘列表爬虫
///
/// 按页码递增顺序抓取搜索结果，页内按文档顺序处理结果块。
/// 页面获取失败或数据库不可用会终止整次运行；单个结果块的其他失败只跳过该块。
pub struct ListingCrawler {
    fetcher: Arc<dyn PageFetcher>,
    gateway: Arc<dyn PersistenceGateway>,
    page: ListingPage,
    filter: EligibilityFilter,
    category: String,
    fetch_timeout: Duration,
    pacer: Pacer,
}

impl ListingCrawler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        gateway: Arc<dyn PersistenceGateway>,
        page: ListingPage,
        filter: EligibilityFilter,
        category: impl Into<String>,
        fetch_timeout: Duration,
        pacer: Pacer,
    ) -> Self {
        Self {
            fetcher,
            gateway,
            page,
            filter,
            category: category.into(),
            fetch_timeout,
            pacer,
        }
    }

    /// 执行一次爬取
    ///
    /// # 参数
    ///
    /// * `keyword` - 搜索关键词
    /// * `target_count` - 本次最多保存的记录数
    /// * `max_pages` - 最多请求的页数
    /// * `cancel` - 在页与页之间检查的取消信号
    pub async fn run(
        &self,
        keyword: &str,
        target_count: usize,
        max_pages: u32,
        cancel: &CancellationToken,
    ) -> CrawlRun {
        let mut run = CrawlRun::new(target_count, max_pages);
        info!(keyword, target_count, max_pages, "Listing sync started");

        while run.should_continue() {
            if cancel.is_cancelled() {
                run.stop_reason = Some(StopReason::Cancelled);
                break;
            }

            let page = run.current_page;
            let url = self.page.page_url(keyword, page);
            debug!(page, url = %url, "Fetching listing page");

            let blocks = match self.fetch_blocks(&url).await {
                Ok(blocks) => blocks,
                Err(err) => {
                    error!(page, "Listing page fetch failed, aborting run: {}", err);
                    run.stop_reason = Some(StopReason::Aborted(err.to_string()));
                    break;
                }
            };
            run.pages_visited += 1;
            metrics::record_page_fetched();

            if blocks.is_empty() {
                info!(page, "No more results");
                run.stop_reason = Some(StopReason::EndOfResults);
                break;
            }

            let mut page_skipped = 0usize;
            for block in blocks {
                if run.target_reached() {
                    break;
                }
                run.entries_visited += 1;

                match self.process_block(block).await {
                    Ok(BlockOutcome::Saved) => {
                        run.saved_count += 1;
                        metrics::record_listing_saved();
                    }
                    Ok(BlockOutcome::Ineligible) => {
                        run.skipped_count += 1;
                        page_skipped += 1;
                        metrics::record_listing_skipped("deadline");
                    }
                    Ok(BlockOutcome::Duplicate) | Err(SyncError::DuplicateKey { .. }) => {
                        run.duplicate_count += 1;
                        metrics::record_listing_skipped("duplicate");
                    }
                    Err(err) if err.is_page_fatal() => {
                        error!(page, "Listing block failed, aborting run: {}", err);
                        run.failed_count += 1;
                        run.stop_reason = Some(StopReason::Aborted(err.to_string()));
                        break;
                    }
                    Err(err) => {
                        warn!(page, "Skipping listing block: {}", err);
                        run.failed_count += 1;
                        metrics::record_listing_skipped("failed");
                    }
                }
            }
            if run.is_aborted() {
                break;
            }

            info!(
                page,
                saved = run.saved_count,
                skipped = page_skipped,
                "Listing page processed"
            );

            run.current_page += 1;
            if run.should_continue() && !self.pacer.pause(cancel).await {
                run.stop_reason = Some(StopReason::Cancelled);
            }
        }

        if run.stop_reason.is_none() {
            run.stop_reason = Some(if run.target_reached() {
                StopReason::TargetReached
            } else {
                StopReason::PageLimit
            });
        }

        info!(
            saved = run.saved_count,
            pages = run.pages_visited,
            "{}",
            run.summary()
        );
        run
    }

    async fn fetch_blocks(&self, url: &str) -> Result<Vec<ListingBlock>, SyncError> {
        let html = self.fetcher.fetch_text(url, self.fetch_timeout).await?;
        // Parsed synchronously so the document never crosses an await
        Ok(self.page.parse(&html))
    }

    /// 处理单个结果块：资格判断、去重检查、写入
    pub async fn process_block(&self, block: ListingBlock) -> Result<BlockOutcome, SyncError> {
        if !self.filter.is_eligible(&block.deadline_text) {
            debug!(deadline = %block.deadline_text, "Listing past cutoff");
            return Ok(BlockOutcome::Ineligible);
        }

        let details = block.details.map_err(SyncError::Parse)?;
        let record = details.into_record(block.deadline_text, &self.category);

        let (company, title) = record.dedup_key();
        if self.gateway.exists_by_key(company, title).await? > 0 {
            debug!(company, title, "Listing already synced");
            return Ok(BlockOutcome::Duplicate);
        }

        match self.gateway.insert(&record).await {
            Ok(()) => Ok(BlockOutcome::Saved),
            Err(RepositoryError::AlreadyExists) => Err(SyncError::DuplicateKey {
                company: record.source_name,
                title: record.title,
            }),
            Err(err) => Err(err.into()),
        }
    }
}
