// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;

use crate::domain::{
    models::{listing::ListingRecord, store::StoreRecord},
    repositories::persistence_gateway::PersistenceGateway,
};
use crate::infrastructure::database::entities::{job_post, store};
use crate::utils::errors::RepositoryError;

/// 公告写入时固定的公司类型
const DEFAULT_COMPANY_TYPE: &str = "무관";

pub struct SeaOrmGateway {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmGateway {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_json_list(values: &[String]) -> serde_json::Value {
    serde_json::Value::from(values.to_vec())
}

fn from_json_list(value: serde_json::Value) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_default()
}

impl From<store::Model> for StoreRecord {
    fn from(model: store::Model) -> Self {
        StoreRecord {
            id: model.id,
            name: model.name,
            address: model.address,
            address_detail: model.address_detail,
            phone: model.phone,
            open_time: model.open_time,
            category: model.category,
            best_menu: model.best_menu,
            menu: from_json_list(model.menu),
            menu_detail: from_json_list(model.menu_detail),
            price: from_json_list(model.price),
            profile_url: model.url,
            image_path: model.image_path,
        }
    }
}

#[async_trait]
impl PersistenceGateway for SeaOrmGateway {
    async fn exists_by_key(&self, source_name: &str, title: &str) -> Result<u64, RepositoryError> {
        let count = job_post::Entity::find()
            .filter(job_post::Column::CompanyName.eq(source_name))
            .filter(job_post::Column::Title.eq(title))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }

    async fn insert(&self, record: &ListingRecord) -> Result<(), RepositoryError> {
        let model = job_post::ActiveModel {
            category: Set(record.category.clone()),
            title: Set(record.title.clone()),
            company_name: Set(record.source_name.clone()),
            company_type: Set(DEFAULT_COMPANY_TYPE.to_string()),
            description: Set(record.location.clone()),
            career_level: Set(record.required_experience.clone()),
            education: Set(record.required_education.clone()),
            deadline: Set(record.deadline_text.clone()),
            link: Set(record.detail_url.clone()),
            is_active: Set(record.is_active),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };

        job_post::Entity::insert(model)
            .exec_without_returning(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn update_image_path(&self, id: i64, filename: &str) -> Result<(), RepositoryError> {
        if filename.trim().is_empty() {
            return Err(RepositoryError::InvalidParameter(
                "image filename must not be empty".to_string(),
            ));
        }

        let result = store::Entity::update_many()
            .col_expr(store::Column::ImagePath, Expr::value(filename))
            .filter(store::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn list_records_with_profile_url(&self) -> Result<Vec<StoreRecord>, RepositoryError> {
        let stores = store::Entity::find()
            .filter(store::Column::Url.is_not_null())
            .filter(store::Column::Url.ne(""))
            .order_by_asc(store::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(stores.into_iter().map(StoreRecord::from).collect())
    }

    async fn save_store(&self, record: &StoreRecord) -> Result<(), RepositoryError> {
        let model = store::ActiveModel {
            id: Set(record.id),
            name: Set(record.name.clone()),
            address: Set(record.address.clone()),
            address_detail: Set(record.address_detail.clone()),
            phone: Set(record.phone.clone()),
            open_time: Set(record.open_time.clone()),
            category: Set(record.category.clone()),
            best_menu: Set(record.best_menu.clone()),
            menu: Set(to_json_list(&record.menu)),
            menu_detail: Set(to_json_list(&record.menu_detail)),
            price: Set(to_json_list(&record.price)),
            url: Set(record.profile_url.clone()),
            image_path: Set(record.image_path.clone()),
        };

        // image_path is owned by the image worker once set
        let on_conflict = OnConflict::column(store::Column::Id)
            .update_columns([
                store::Column::Name,
                store::Column::Address,
                store::Column::AddressDetail,
                store::Column::Phone,
                store::Column::OpenTime,
                store::Column::Category,
                store::Column::BestMenu,
                store::Column::Menu,
                store::Column::MenuDetail,
                store::Column::Price,
                store::Column::Url,
            ])
            .to_owned();

        store::Entity::insert(model)
            .on_conflict(on_conflict)
            .exec_without_returning(self.db.as_ref())
            .await?;
        Ok(())
    }
}
