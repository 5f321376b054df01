// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 招聘公告记录
///
/// 去重键为 `(source_name, title)`，大小写与空白均敏感。
/// 插入后本管道不再修改该记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// 发布方名称（公司名）
    pub source_name: String,
    /// 公告标题
    pub title: String,
    /// 工作地点
    pub location: String,
    /// 经验要求
    pub required_experience: String,
    /// 学历要求
    pub required_education: String,
    /// 原始截止日期文本
    pub deadline_text: String,
    /// 详情页链接
    pub detail_url: String,
    /// 分类
    pub category: String,
    /// 是否有效
    pub is_active: bool,
}

impl ListingRecord {
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.source_name, &self.title)
    }
}

/// 搜索结果页中的单个结果块
///
/// 截止日期总是先于其他字段提取，以便在资格过滤之前
/// 不因其他字段缺失而丢弃整个块。
#[derive(Debug, Clone)]
pub struct ListingBlock {
    pub deadline_text: String,
    pub details: Result<ListingDetails, String>,
}

/// 结果块中除截止日期以外的字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDetails {
    pub title: String,
    pub source_name: String,
    pub location: String,
    pub required_experience: String,
    pub required_education: String,
    pub detail_url: String,
}

impl ListingDetails {
    /// 组装为待插入的公告记录（`is_active = true`）
    pub fn into_record(self, deadline_text: String, category: &str) -> ListingRecord {
        ListingRecord {
            source_name: self.source_name,
            title: self.title,
            location: self.location,
            required_experience: self.required_experience,
            required_education: self.required_education,
            deadline_text,
            detail_url: self.detail_url,
            category: category.to_string(),
            is_active: true,
        }
    }
}
