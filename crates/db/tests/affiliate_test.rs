//! Integration tests for the affiliate repository.
//!
//! These tests need a running Postgres with migrations applied; run them
//! with `cargo test -- --ignored`.

mod common;

use cashcall_db::repositories::AffiliateRepository;
use sea_orm::Database;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_list_returns_all_affiliates() {
    let db = Database::connect(&common::get_database_url())
        .await
        .expect("Failed to connect to database");

    let first = common::create_test_affiliate(&db).await;
    let second = common::create_test_affiliate(&db).await;

    let repo = AffiliateRepository::new(db.clone());
    let listed = repo.list().await.expect("Failed to list affiliates");
    assert!(listed.iter().any(|a| a.id == first));
    assert!(listed.iter().any(|a| a.id == second));
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_find_by_id() {
    let db = Database::connect(&common::get_database_url())
        .await
        .expect("Failed to connect to database");

    let affiliate_id = common::create_test_affiliate(&db).await;

    let repo = AffiliateRepository::new(db.clone());
    let found = repo
        .find_by_id(affiliate_id)
        .await
        .expect("Failed to query affiliate");
    assert_eq!(found.map(|a| a.id), Some(affiliate_id));

    let missing = repo
        .find_by_id(Uuid::new_v4())
        .await
        .expect("Failed to query affiliate");
    assert!(missing.is_none());
}
