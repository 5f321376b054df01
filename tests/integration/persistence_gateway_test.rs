// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::sqlite_db;
use portal_sync::domain::models::listing::ListingRecord;
use portal_sync::domain::models::store::StoreRecord;
use portal_sync::domain::repositories::persistence_gateway::PersistenceGateway;
use portal_sync::infrastructure::repositories::SeaOrmGateway;
use portal_sync::utils::errors::RepositoryError;
use std::sync::Arc;

fn listing(company: &str, title: &str) -> ListingRecord {
    ListingRecord {
        source_name: company.to_string(),
        title: title.to_string(),
        location: "대전 서구".to_string(),
        required_experience: "경력 3년↑".to_string(),
        required_education: "대졸↑".to_string(),
        deadline_text: "~ 02/14(토)".to_string(),
        detail_url: "https://www.saramin.co.kr/zf_user/jobs/relay/view?rec_idx=1".to_string(),
        category: "JOBS".to_string(),
        is_active: true,
    }
}

fn store(id: i64, url: Option<&str>) -> StoreRecord {
    StoreRecord {
        id,
        name: format!("가게 {}", id),
        menu: vec!["두부두루치기".to_string()],
        price: vec!["9000".to_string()],
        profile_url: url.map(str::to_string),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_exists_by_key_is_exact_match() {
    let test_db = sqlite_db().await;
    let gateway = SeaOrmGateway::new(test_db.db.clone());

    gateway.insert(&listing("Acme", "Backend Engineer")).await.unwrap();

    assert_eq!(gateway.exists_by_key("Acme", "Backend Engineer").await.unwrap(), 1);
    assert_eq!(gateway.exists_by_key("acme", "Backend Engineer").await.unwrap(), 0);
    assert_eq!(gateway.exists_by_key("Acme", "Backend Engineer ").await.unwrap(), 0);
    assert_eq!(gateway.exists_by_key("Other", "Backend Engineer").await.unwrap(), 0);
}

#[tokio::test]
async fn test_duplicate_insert_is_rejected() {
    let test_db = sqlite_db().await;
    let gateway = SeaOrmGateway::new(test_db.db.clone());

    gateway.insert(&listing("Acme", "QA")).await.unwrap();
    let err = gateway.insert(&listing("Acme", "QA")).await.unwrap_err();

    assert!(matches!(err, RepositoryError::AlreadyExists));
    assert_eq!(gateway.exists_by_key("Acme", "QA").await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_records_skips_missing_profile_urls() {
    let test_db = sqlite_db().await;
    let gateway = SeaOrmGateway::new(test_db.db.clone());

    gateway.save_store(&store(3, Some("https://map.example.com/3"))).await.unwrap();
    gateway.save_store(&store(1, Some("https://map.example.com/1"))).await.unwrap();
    gateway.save_store(&store(2, None)).await.unwrap();
    gateway.save_store(&store(4, Some(""))).await.unwrap();

    let records = gateway.list_records_with_profile_url().await.unwrap();
    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();

    assert_eq!(ids, vec![1, 3]);
    assert_eq!(records[0].menu, vec!["두부두루치기"]);
    assert_eq!(records[0].price, vec!["9000"]);
}

#[tokio::test]
async fn test_update_image_path() {
    let test_db = sqlite_db().await;
    let gateway = Arc::new(SeaOrmGateway::new(test_db.db.clone()));
    gateway.save_store(&store(9, Some("https://map.example.com/9"))).await.unwrap();

    gateway.update_image_path(9, "9.jpg").await.unwrap();
    let records = gateway.list_records_with_profile_url().await.unwrap();
    assert_eq!(records[0].image_path.as_deref(), Some("9.jpg"));

    assert!(matches!(
        gateway.update_image_path(404, "404.jpg").await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        gateway.update_image_path(9, " ").await,
        Err(RepositoryError::InvalidParameter(_))
    ));
}
