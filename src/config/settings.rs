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

use crate::domain::services::eligibility_filter::{EligibilityFilter, YearInference};
use crate::engines::reqwest_engine::BROWSER_USER_AGENT;
use chrono::{Datelike, NaiveDate};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、数据库、列表抓取、图片采集、节奏控制和指标等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 招聘列表抓取配置
    pub listing: ListingSettings,
    /// 截止日期筛选配置
    pub eligibility: EligibilitySettings,
    /// 图片采集配置
    pub images: ImageSettings,
    /// 节奏控制配置
    pub pacing: PacingSettings,
    /// 店铺目录同步配置
    pub store_directory: StoreDirectorySettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 数据库配置设置
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 招聘列表抓取配置
#[derive(Debug, Clone, Deserialize)]
pub struct ListingSettings {
    /// 搜索页地址（不含关键词和页码参数）
    pub search_url: String,
    /// 详情链接的站点前缀
    pub link_base: String,
    /// 默认搜索关键词
    pub keyword: String,
    /// 默认目标保存数量
    pub target_count: u32,
    /// 默认最大页数
    pub max_pages: u32,
    /// 单页获取超时（秒）
    pub fetch_timeout_secs: u64,
    /// 请求使用的客户端标识
    pub user_agent: String,
    /// 保存记录时使用的分类
    pub category: String,
}

impl ListingSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// 截止日期筛选配置
#[derive(Debug, Clone, Deserialize)]
pub struct EligibilitySettings {
    /// 截止日期下限，早于此日期的记录被过滤
    pub cutoff: NaiveDate,
    /// 年份推断的基准年；未设置时为截止日期前一年
    pub base_year: Option<i32>,
    /// 月份小于该值时推断为基准年的下一年
    pub rollover_month: u32,
}

impl EligibilitySettings {
    /// 根据配置构建筛选器
    pub fn filter(&self) -> EligibilityFilter {
        let inference = YearInference {
            base_year: self.base_year.unwrap_or(self.cutoff.year() - 1),
            rollover_month: self.rollover_month,
        };
        EligibilityFilter::new(self.cutoff, inference)
    }
}

/// 图片采集配置
#[derive(Debug, Clone, Deserialize)]
pub struct ImageSettings {
    /// 图片保存目录
    pub storage_dir: String,
    /// 导航后的固定等待（毫秒）
    pub navigation_wait_ms: u64,
    /// 需要切换进入的内嵌框架名称
    pub frame_name: String,
    /// 等待内嵌框架出现的超时（秒）
    pub frame_timeout_secs: u64,
    /// 图片下载超时（秒）
    pub download_timeout_secs: u64,
    /// 单个选择器探测超时（秒）
    pub probe_timeout_secs: u64,
    /// 单条记录的整体超时（秒）
    pub session_timeout_secs: u64,
    /// 会话最多复用的记录数
    pub recycle_after: u32,
    /// 并行的采集工作者数量
    pub workers: usize,
    /// 是否使用无头模式
    pub headless: bool,
    /// 远程 Chrome 调试地址
    pub remote_debugging_url: Option<String>,
}

/// 节奏控制配置
#[derive(Debug, Clone, Deserialize)]
pub struct PacingSettings {
    /// 列表页之间的间隔（毫秒）
    pub page_interval_ms: u64,
    /// 图片记录之间的间隔（毫秒）
    pub record_interval_ms: u64,
}

/// 店铺目录同步配置
#[derive(Debug, Clone, Deserialize)]
pub struct StoreDirectorySettings {
    /// 目录接口地址
    pub api_url: String,
    /// 同步的页数
    pub pages: u32,
}

/// 指标配置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加内置默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("PORTAL_SYNC").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// 仅包含内置默认值的构建器
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default DB pool settings
            .set_default("database.url", "sqlite://portal_sync.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Listing source
            .set_default(
                "listing.search_url",
                "https://www.saramin.co.kr/zf_user/search/recruit?search_area=main&search_done=y&search_optional_item=n&searchType=search",
            )?
            .set_default("listing.link_base", "https://www.saramin.co.kr")?
            .set_default("listing.keyword", "대전")?
            .set_default("listing.target_count", 30)?
            .set_default("listing.max_pages", 100)?
            .set_default("listing.fetch_timeout_secs", 10)?
            .set_default("listing.user_agent", BROWSER_USER_AGENT)?
            .set_default("listing.category", "JOBS")?
            .set_default("eligibility.cutoff", "2026-01-21")?
            .set_default("eligibility.rollover_month", 6)?
            // Image acquisition
            .set_default("images.storage_dir", "./storage/images")?
            .set_default("images.navigation_wait_ms", 1500)?
            .set_default("images.frame_name", "entryIframe")?
            .set_default("images.frame_timeout_secs", 5)?
            .set_default("images.download_timeout_secs", 10)?
            .set_default("images.probe_timeout_secs", 2)?
            .set_default("images.session_timeout_secs", 30)?
            .set_default("images.recycle_after", 1)?
            .set_default("images.workers", 1)?
            .set_default("images.headless", true)?
            .set_default("pacing.page_interval_ms", 1000)?
            .set_default("pacing.record_interval_ms", 1000)?
            .set_default(
                "store_directory.api_url",
                "https://bigdata.daejeon.go.kr/api/stores/",
            )?
            .set_default("store_directory.pages", 10)?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
