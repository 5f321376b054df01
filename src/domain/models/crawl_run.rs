// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

/// 爬取运行终止原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// 已保存目标数量
    TargetReached,
    /// 已访问最大页数
    PageLimit,
    /// 结果页为空，没有更多结果
    EndOfResults,
    /// 页面获取失败，剩余页面被放弃
    Aborted(String),
    /// 操作员取消
    Cancelled,
}

/// 一次公告爬取的瞬时状态
///
/// 每次调用创建一个实例，生成摘要后即丢弃。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRun {
    pub target_count: usize,
    pub max_pages: u32,
    /// 下一个待请求的页码（从 1 开始）
    pub current_page: u32,
    /// 已成功获取并处理的页数
    pub pages_visited: u32,
    /// 已访问的结果块数
    pub entries_visited: usize,
    pub saved_count: usize,
    /// 因截止日期不符被跳过的数量
    pub skipped_count: usize,
    /// 已同步过的重复公告数量
    pub duplicate_count: usize,
    /// 解析或写入失败的结果块数量
    pub failed_count: usize,
    pub stop_reason: Option<StopReason>,
}

impl CrawlRun {
    pub fn new(target_count: usize, max_pages: u32) -> Self {
        Self {
            target_count,
            max_pages,
            current_page: 1,
            pages_visited: 0,
            entries_visited: 0,
            saved_count: 0,
            skipped_count: 0,
            duplicate_count: 0,
            failed_count: 0,
            stop_reason: None,
        }
    }

    pub fn target_reached(&self) -> bool {
        self.saved_count >= self.target_count
    }

    /// 是否还应请求下一页
    pub fn should_continue(&self) -> bool {
        self.stop_reason.is_none() && !self.target_reached() && self.current_page <= self.max_pages
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self.stop_reason, Some(StopReason::Aborted(_)))
    }

    /// 生成运行摘要文本
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CrawlRun {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.stop_reason {
            Some(StopReason::Aborted(reason)) => write!(
                f,
                "Listing sync aborted on page {}: {} ({} items saved before failure)",
                self.current_page, reason, self.saved_count
            ),
            Some(StopReason::Cancelled) => write!(
                f,
                "Listing sync cancelled: {} items saved (pages visited: {})",
                self.saved_count, self.pages_visited
            ),
            _ => write!(
                f,
                "Listing sync finished: {} items saved, {} skipped by deadline, {} already synced, {} failed (pages visited: {})",
                self.saved_count,
                self.skipped_count,
                self.duplicate_count,
                self.failed_count,
                self.pages_visited
            ),
        }
    }
}
