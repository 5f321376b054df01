// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 店铺记录
///
/// 由店铺目录同步写入；图片采集只读取 `profile_url` 并回写 `image_path`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoreRecord {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub address_detail: Option<String>,
    pub phone: Option<String>,
    pub open_time: Option<String>,
    pub category: Option<String>,
    pub best_menu: Option<String>,
    pub menu: Vec<String>,
    pub menu_detail: Vec<String>,
    pub price: Vec<String>,
    /// 外部介绍页地址（地图详情页等）
    pub profile_url: Option<String>,
    /// 本地图片文件名
    pub image_path: Option<String>,
}

impl StoreRecord {
    /// 返回非空的介绍页地址
    pub fn profile_url(&self) -> Option<&str> {
        self.profile_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
