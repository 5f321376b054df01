// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use portal_sync::domain::models::listing::ListingRecord;
use portal_sync::domain::models::store::StoreRecord;
use portal_sync::domain::repositories::persistence_gateway::PersistenceGateway;
use portal_sync::utils::errors::RepositoryError;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// 内存中的持久化网关
///
/// 与数据库实现保持相同的语义：去重键精确匹配、冲突返回 `AlreadyExists`
#[derive(Default)]
pub struct InMemoryGateway {
    listings: Mutex<Vec<ListingRecord>>,
    stores: Mutex<BTreeMap<i64, StoreRecord>>,
    /// 插入时强制失败的标题
    failing_titles: Mutex<HashSet<String>>,
    /// 模拟数据库不可用
    unavailable: AtomicBool,
}

impl InMemoryGateway {
    pub fn listings(&self) -> Vec<ListingRecord> {
        self.listings.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.listings().into_iter().map(|r| r.title).collect()
    }

    pub fn store(&self, id: i64) -> Option<StoreRecord> {
        self.stores.lock().unwrap().get(&id).cloned()
    }

    pub fn seed_store(&self, id: i64, profile_url: Option<&str>) {
        let record = StoreRecord {
            id,
            name: format!("store-{}", id),
            profile_url: profile_url.map(str::to_string),
            ..Default::default()
        };
        self.stores.lock().unwrap().insert(id, record);
    }

    pub fn fail_insert_for(&self, title: &str) {
        self.failing_titles.lock().unwrap().insert(title.to_string());
    }

    /// 之后的所有查询都返回数据库错误
    pub fn go_offline(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn exists_by_key(&self, source_name: &str, title: &str) -> Result<u64, RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::DatabaseError("connection refused".to_string()));
        }
        let count = self
            .listings
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.source_name == source_name && r.title == title)
            .count();
        Ok(count as u64)
    }

    async fn insert(&self, record: &ListingRecord) -> Result<(), RepositoryError> {
        if self.failing_titles.lock().unwrap().contains(&record.title) {
            return Err(RepositoryError::InvalidParameter("value too long for column".to_string()));
        }

        let mut listings = self.listings.lock().unwrap();
        if listings.iter().any(|r| r.dedup_key() == record.dedup_key()) {
            return Err(RepositoryError::AlreadyExists);
        }
        listings.push(record.clone());
        Ok(())
    }

    async fn update_image_path(&self, id: i64, filename: &str) -> Result<(), RepositoryError> {
        match self.stores.lock().unwrap().get_mut(&id) {
            Some(store) => {
                store.image_path = Some(filename.to_string());
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn list_records_with_profile_url(&self) -> Result<Vec<StoreRecord>, RepositoryError> {
        Ok(self
            .stores
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.profile_url.as_deref().is_some_and(|url| !url.is_empty()))
            .cloned()
            .collect())
    }

    async fn save_store(&self, store: &StoreRecord) -> Result<(), RepositoryError> {
        let mut stores = self.stores.lock().unwrap();
        let image_path = stores.get(&store.id).and_then(|s| s.image_path.clone());
        let mut record = store.clone();
        if image_path.is_some() {
            record.image_path = image_path;
        }
        stores.insert(store.id, record);
        Ok(())
    }
}
