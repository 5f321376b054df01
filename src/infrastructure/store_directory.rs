// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::store::StoreRecord;
use crate::engines::traits::PageFetcher;
use crate::utils::errors::SyncError;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// 店铺目录接口的单页响应
#[derive(Debug, Deserialize)]
pub struct StoreDirectoryPage {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub results: Vec<StoreDirectoryEntry>,
}

/// 店铺目录条目
///
/// 上游使用大写缩写字段名，同时接受驼峰形式。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDirectoryEntry {
    #[serde(alias = "REST_ID", default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(alias = "REST_NM", default)]
    pub name: Option<String>,
    #[serde(alias = "ADDR", default)]
    pub address: Option<String>,
    #[serde(alias = "DADDR", default)]
    pub address_detail: Option<String>,
    #[serde(alias = "TELNO", default)]
    pub phone: Option<String>,
    #[serde(alias = "OPEN_HR_INFO", default)]
    pub open_time: Option<String>,
    #[serde(rename = "restCategory", alias = "TOB_INFO", default)]
    pub category: Option<String>,
    #[serde(alias = "RPRS_MENU_NM", default)]
    pub best_menu: Option<String>,
    #[serde(alias = "MENU_KORN_NM", default)]
    pub menu: Option<Vec<String>>,
    #[serde(alias = "MENU_KORN_ADD_INFO", default)]
    pub menu_detail: Option<Vec<String>>,
    #[serde(alias = "MENU_AMT", default)]
    pub price: Option<Vec<String>>,
    #[serde(alias = "SD_URL", default)]
    pub url: Option<String>,
    #[serde(alias = "REST_IMAGE", default)]
    pub image_path: Option<String>,
}

/// 接受数字或数字字符串形式的 id
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(id)),
        Some(RawId::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl StoreDirectoryEntry {
    /// 转换为店铺记录；缺少 id 或名称的条目无法保存
    pub fn into_record(self) -> Result<StoreRecord, SyncError> {
        let id = self
            .id
            .ok_or_else(|| SyncError::Parse("store entry without id".to_string()))?;
        let name = self
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| SyncError::Parse(format!("store {} without name", id)))?;

        Ok(StoreRecord {
            id,
            name,
            address: self.address,
            address_detail: self.address_detail,
            phone: self.phone,
            open_time: self.open_time,
            category: self.category,
            best_menu: self.best_menu,
            menu: self.menu.unwrap_or_default(),
            menu_detail: self.menu_detail.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            profile_url: self.url,
            image_path: self.image_path,
        })
    }
}

/// 店铺目录接口客户端
pub struct StoreDirectoryClient {
    fetcher: Arc<dyn PageFetcher>,
    api_url: Url,
    timeout: Duration,
}

impl StoreDirectoryClient {
    pub fn new(fetcher: Arc<dyn PageFetcher>, api_url: Url, timeout: Duration) -> Self {
        Self {
            fetcher,
            api_url,
            timeout,
        }
    }

    pub fn page_url(&self, page: u32) -> String {
        let mut url = self.api_url.clone();
        url.query_pairs_mut().append_pair("page", &page.to_string());
        url.into()
    }

    /// 获取并解析第 `page` 页
    pub async fn fetch_page(&self, page: u32) -> Result<StoreDirectoryPage, SyncError> {
        let url = self.page_url(page);
        let body = self.fetcher.fetch_text(&url, self.timeout).await?;
        serde_json::from_str(&body)
            .map_err(|e| SyncError::Parse(format!("store directory page {}: {}", page, e)))
    }
}
