// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::fmt;

/// 图片采集结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageOutcome {
    /// 图片已下载并回写文件名
    Saved,
    /// 页面上没有可用的候选图片
    NoImageFound,
    /// 会话内任意步骤失败
    SessionError,
}

impl ImageOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageOutcome::Saved => "saved",
            ImageOutcome::NoImageFound => "no_image_found",
            ImageOutcome::SessionError => "session_error",
        }
    }
}

impl fmt::Display for ImageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单条记录的图片采集任务
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageJob {
    pub record_id: i64,
    pub profile_url: String,
    pub candidate_image_url: Option<String>,
    pub local_filename: Option<String>,
    pub outcome: ImageOutcome,
}

impl ImageJob {
    pub fn new(record_id: i64, profile_url: impl Into<String>) -> Self {
        Self {
            record_id,
            profile_url: profile_url.into(),
            candidate_image_url: None,
            local_filename: None,
            outcome: ImageOutcome::SessionError,
        }
    }
}

/// 一批图片任务的累计结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageBatch {
    pub jobs: Vec<ImageJob>,
    /// 介绍页地址为空而未处理的记录
    pub skipped_count: usize,
    pub cancelled: bool,
}

impl ImageBatch {
    pub fn count(&self, outcome: ImageOutcome) -> usize {
        self.jobs.iter().filter(|job| job.outcome == outcome).count()
    }

    pub fn summary(&self) -> String {
        let verb = if self.cancelled { "cancelled" } else { "finished" };
        format!(
            "Image sync {}: {} items saved, {} without image, {} failed (processed: {})",
            verb,
            self.count(ImageOutcome::Saved),
            self.count(ImageOutcome::NoImageFound),
            self.count(ImageOutcome::SessionError),
            self.jobs.len()
        )
    }
}
