// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::ListingRecord;
use crate::domain::models::store::StoreRecord;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;

/// 持久化网关特质
///
/// 同步管道唯一共享的可变资源。两类爬虫只会追加或按各自的
/// 标识更新行，彼此之间没有竞争。
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// 统计去重键 `(source_name, title)` 已存在的行数（精确匹配）
    async fn exists_by_key(&self, source_name: &str, title: &str) -> Result<u64, RepositoryError>;

    /// 插入公告记录
    ///
    /// 去重键冲突时返回 `RepositoryError::AlreadyExists`
    async fn insert(&self, record: &ListingRecord) -> Result<(), RepositoryError>;

    /// 回写店铺的本地图片文件名
    async fn update_image_path(&self, id: i64, filename: &str) -> Result<(), RepositoryError>;

    /// 列出所有带介绍页地址的店铺，按 id 升序
    async fn list_records_with_profile_url(&self) -> Result<Vec<StoreRecord>, RepositoryError>;

    /// 按 id 写入或更新店铺目录条目，不覆盖已有的图片文件名
    async fn save_store(&self, store: &StoreRecord) -> Result<(), RepositoryError>;
}
